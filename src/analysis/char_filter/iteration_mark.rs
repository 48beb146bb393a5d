//! Japanese iteration mark expansion.
//!
//! `々` repeats the preceding kanji, `ゝ`/`ヽ` the preceding kana and
//! `ゞ`/`ヾ` the preceding kana with a voicing mark. A run of marks repeats
//! as many preceding characters as there are marks, so `馬鹿々々` becomes
//! `馬鹿馬鹿`.

use serde::{Deserialize, Serialize};

use super::{CharFilter, Transformation};

const KANJI_ITERATION_MARK: char = '々';
const HIRAGANA_ITERATION_MARK: char = 'ゝ';
const HIRAGANA_DAKUON_ITERATION_MARK: char = 'ゞ';
const KATAKANA_ITERATION_MARK: char = 'ヽ';
const KATAKANA_DAKUON_ITERATION_MARK: char = 'ヾ';

fn shift(c: char, delta: i32) -> char {
    char::from_u32((c as i32 + delta) as u32).unwrap_or(c)
}

/// Voiced form of a hiragana (か → が); unvoiceable characters are returned as is.
fn hiragana_add_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x304b..=0x3062 if codepoint % 2 == 1 => shift(c, 1),
        0x3064..=0x3069 if codepoint % 2 == 0 => shift(c, 1),
        0x306f..=0x307d if codepoint % 3 == 0 => shift(c, 1),
        _ => c,
    }
}

fn hiragana_remove_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x304b..=0x3062 if codepoint % 2 == 0 => shift(c, -1),
        0x3064..=0x3069 if codepoint % 2 == 1 => shift(c, -1),
        0x306f..=0x307d if codepoint % 3 == 1 => shift(c, -1),
        _ => c,
    }
}

fn katakana_add_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x30ab..=0x30c2 if codepoint % 2 == 1 => shift(c, 1),
        0x30c4..=0x30c9 if codepoint % 2 == 0 => shift(c, 1),
        0x30cf..=0x30dd if codepoint % 3 == 0 => shift(c, 1),
        _ => c,
    }
}

fn katakana_remove_dakuon(c: char) -> char {
    let codepoint = c as u32;
    match codepoint {
        0x30ab..=0x30c2 if codepoint % 2 == 0 => shift(c, -1),
        0x30c4..=0x30c9 if codepoint % 2 == 1 => shift(c, -1),
        0x30cf..=0x30dd if codepoint % 3 == 1 => shift(c, -1),
        _ => c,
    }
}

fn is_kanji(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{20000}'..='\u{2A6DF}')
}

fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}')
}

fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}')
}

/// Settings for [`IterationMarkCharFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationMarkConfig {
    pub normalize_kanji: bool,
    pub normalize_kana: bool,
}

impl Default for IterationMarkConfig {
    fn default() -> Self {
        IterationMarkConfig {
            normalize_kanji: true,
            normalize_kana: true,
        }
    }
}

/// Replaces iteration marks with the characters they repeat.
#[derive(Debug, Clone, Default)]
pub struct IterationMarkCharFilter {
    config: IterationMarkConfig,
}

impl IterationMarkCharFilter {
    pub fn new(normalize_kanji: bool, normalize_kana: bool) -> Self {
        Self::with_config(IterationMarkConfig {
            normalize_kanji,
            normalize_kana,
        })
    }

    pub fn with_config(config: IterationMarkConfig) -> Self {
        IterationMarkCharFilter { config }
    }

    fn is_enabled_mark(&self, c: char) -> bool {
        match c {
            KANJI_ITERATION_MARK => self.config.normalize_kanji,
            HIRAGANA_ITERATION_MARK
            | HIRAGANA_DAKUON_ITERATION_MARK
            | KATAKANA_ITERATION_MARK
            | KATAKANA_DAKUON_ITERATION_MARK => self.config.normalize_kana,
            _ => false,
        }
    }

    /// Expansion of `mark` when it repeats `source`, or the mark itself if
    /// the source is of the wrong script.
    fn expand(mark: char, source: char) -> char {
        match mark {
            KANJI_ITERATION_MARK if is_kanji(source) => source,
            HIRAGANA_ITERATION_MARK if is_hiragana(source) => hiragana_remove_dakuon(source),
            HIRAGANA_DAKUON_ITERATION_MARK if is_hiragana(source) => hiragana_add_dakuon(source),
            KATAKANA_ITERATION_MARK if is_katakana(source) => katakana_remove_dakuon(source),
            KATAKANA_DAKUON_ITERATION_MARK if is_katakana(source) => katakana_add_dakuon(source),
            _ => mark,
        }
    }
}

impl CharFilter for IterationMarkCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let mut normalized: Vec<char> = Vec::with_capacity(chars.len());
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            if !self.is_enabled_mark(chars[i].1) {
                normalized.push(chars[i].1);
                output.push(chars[i].1);
                i += 1;
                continue;
            }

            let run_start = i;
            let mut run_end = i;
            while run_end < chars.len() && self.is_enabled_mark(chars[run_end].1) {
                run_end += 1;
            }
            // A run of k marks repeats the k characters before it, or as many
            // as exist.
            let back = (run_end - run_start).min(run_start);

            let original_start = chars[run_start].0;
            let original_end = chars.get(run_end).map_or(input.len(), |(offset, _)| *offset);
            let new_start = output.len();

            for (index, &(_, mark)) in chars.iter().enumerate().take(run_end).skip(run_start) {
                let expanded = match index.checked_sub(back) {
                    Some(source) if back > 0 => Self::expand(mark, normalized[source]),
                    _ => mark,
                };
                normalized.push(expanded);
                output.push(expanded);
            }

            if output[new_start..] != input[original_start..original_end] {
                transformations.push(Transformation::new(
                    original_start,
                    original_end,
                    new_start,
                    output.len(),
                ));
            }
            i = run_end;
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "iteration_mark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(input: &str) -> String {
        IterationMarkCharFilter::default().filter(input).0
    }

    #[test]
    fn test_kanji_iteration_mark() {
        let filter = IterationMarkCharFilter::default();
        let (output, trans) = filter.filter("佐々木");
        assert_eq!(output, "佐佐木");
        assert_eq!(trans.len(), 1);
        assert_eq!(trans[0], Transformation::new(3, 6, 3, 6));
    }

    #[test]
    fn test_run_of_marks_repeats_run_of_chars() {
        assert_eq!(apply("馬鹿々々しい"), "馬鹿馬鹿しい");
        assert_eq!(apply("時々刻々"), "時時刻刻");
    }

    #[test]
    fn test_kana_marks() {
        assert_eq!(apply("いすゞ"), "いすず");
        assert_eq!(apply("こゝろ"), "こころ");
        assert_eq!(apply("ぶゝ"), "ぶふ");
        assert_eq!(apply("バヽ"), "バハ");
        assert_eq!(apply("ハヾ"), "ハバ");
    }

    #[test]
    fn test_mark_without_valid_source_is_kept() {
        assert_eq!(apply("々"), "々");
        assert_eq!(apply("あ々"), "あ々");
        assert_eq!(apply("漢ゝ"), "漢ゝ");
        let (_, trans) = IterationMarkCharFilter::default().filter("々");
        assert!(trans.is_empty());
    }

    #[test]
    fn test_disabled_kinds_pass_through() {
        let filter = IterationMarkCharFilter::new(false, true);
        assert_eq!(filter.filter("佐々木").0, "佐々木");
        assert_eq!(filter.filter("いすゞ").0, "いすず");

        let filter = IterationMarkCharFilter::new(true, false);
        assert_eq!(filter.filter("いすゞ").0, "いすゞ");
    }

    #[test]
    fn test_name() {
        assert_eq!(IterationMarkCharFilter::default().name(), "iteration_mark");
    }
}
