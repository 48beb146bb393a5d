//! Normalizes dash-like characters used as a Japanese prolonged sound mark.
//!
//! Text typed on Western keyboards often writes `ラ-メン` or `ラ―メン` where
//! `ラーメン` is meant. A dash-like character directly after a kana (or after
//! another prolonged sound mark) is replaced with the configured mark.

use serde::{Deserialize, Serialize};

use super::{CharFilter, Transformation};

/// Default replacement, KATAKANA-HIRAGANA PROLONGED SOUND MARK.
pub const DEFAULT_PROLONGED_SOUND_MARK: char = '\u{30FC}';

fn is_dash_like(c: char) -> bool {
    matches!(
        c,
        '\u{002D}' // HYPHEN-MINUS
            | '\u{2010}'..='\u{2015}' // HYPHEN .. HORIZONTAL BAR
            | '\u{2212}' // MINUS SIGN
            | '\u{2500}' // BOX DRAWINGS LIGHT HORIZONTAL
            | '\u{2501}' // BOX DRAWINGS HEAVY HORIZONTAL
            | '\u{30FC}' // KATAKANA-HIRAGANA PROLONGED SOUND MARK
            | '\u{FE63}' // SMALL HYPHEN-MINUS
            | '\u{FF0D}' // FULLWIDTH HYPHEN-MINUS
            | '\u{FF70}' // HALFWIDTH KATAKANA-HIRAGANA PROLONGED SOUND MARK
    )
}

fn is_kana(c: char) -> bool {
    matches!(c,
        '\u{3041}'..='\u{3096}' | // Hiragana
        '\u{30A1}'..='\u{30FA}' | // Katakana
        '\u{FF66}'..='\u{FF9F}'   // Halfwidth Katakana and sound marks
    )
}

/// Settings for [`ProlongedSoundMarkCharFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProlongedSoundMarkConfig {
    /// Replacement text; only its first character is used. Empty or absent
    /// means U+30FC.
    pub replacement: Option<String>,
}

/// Replaces dash-like characters following kana with a prolonged sound mark.
#[derive(Debug, Clone)]
pub struct ProlongedSoundMarkCharFilter {
    replacement: char,
}

impl Default for ProlongedSoundMarkCharFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PROLONGED_SOUND_MARK)
    }
}

impl ProlongedSoundMarkCharFilter {
    pub fn new(replacement: char) -> Self {
        ProlongedSoundMarkCharFilter { replacement }
    }

    pub fn with_config(config: &ProlongedSoundMarkConfig) -> Self {
        let replacement = config
            .replacement
            .as_deref()
            .and_then(|text| text.chars().next())
            .unwrap_or(DEFAULT_PROLONGED_SOUND_MARK);
        Self::new(replacement)
    }

    pub fn replacement(&self) -> char {
        self.replacement
    }
}

impl CharFilter for ProlongedSoundMarkCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        let mut after_kana = false;

        for (offset, c) in input.char_indices() {
            if after_kana && is_dash_like(c) {
                if c != self.replacement {
                    let new_start = output.len();
                    output.push(self.replacement);
                    transformations.push(Transformation::new(
                        offset,
                        offset + c.len_utf8(),
                        new_start,
                        output.len(),
                    ));
                } else {
                    output.push(c);
                }
                // "ラ--" marks both dashes.
                continue;
            }
            after_kana = is_kana(c);
            output.push(c);
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "prolonged_sound_mark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(input: &str) -> String {
        ProlongedSoundMarkCharFilter::default().filter(input).0
    }

    #[test]
    fn test_dash_after_katakana() {
        let filter = ProlongedSoundMarkCharFilter::default();
        let (output, trans) = filter.filter("ラ-メン");
        assert_eq!(output, "ラーメン");
        assert_eq!(trans, vec![Transformation::new(3, 4, 3, 6)]);
    }

    #[test]
    fn test_various_dashes() {
        assert_eq!(apply("コ―ヒ—"), "コーヒー");
        assert_eq!(apply("すー"), "すー");
        assert_eq!(apply("ｽｰﾊﾟ－"), "ｽーﾊﾟー");
    }

    #[test]
    fn test_consecutive_dashes() {
        assert_eq!(apply("ラ--"), "ラーー");
    }

    #[test]
    fn test_dash_elsewhere_untouched() {
        assert_eq!(apply("well-known 2-3"), "well-known 2-3");
        assert_eq!(apply("漢-字"), "漢-字");
        assert_eq!(apply("-ラ"), "-ラ");
        let (_, trans) = ProlongedSoundMarkCharFilter::default().filter("a-b");
        assert!(trans.is_empty());
    }

    #[test]
    fn test_custom_replacement() {
        let filter = ProlongedSoundMarkCharFilter::with_config(&ProlongedSoundMarkConfig {
            replacement: Some("~".to_string()),
        });
        assert_eq!(filter.filter("ラ-メン").0, "ラ~メン");

        let filter = ProlongedSoundMarkCharFilter::with_config(&ProlongedSoundMarkConfig {
            replacement: Some(String::new()),
        });
        assert_eq!(filter.replacement(), DEFAULT_PROLONGED_SOUND_MARK);
    }
}
