//! Keeps tokens that contain at least one character of an enabled class.
//!
//! With the defaults, punctuation-only and symbol-only tokens are dropped.

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Character classes a token may contain to be kept. All default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharTypeConfig {
    /// ASCII letters
    pub alphabetic: bool,
    /// Decimal digits
    pub digit: bool,
    /// Any Unicode letter
    pub letter: bool,
}

impl Default for CharTypeConfig {
    fn default() -> Self {
        CharTypeConfig {
            alphabetic: true,
            digit: true,
            letter: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CharTypeFilter {
    config: CharTypeConfig,
}

impl CharTypeFilter {
    pub fn new(config: CharTypeConfig) -> Self {
        CharTypeFilter { config }
    }

    fn accepts(&self, c: char) -> bool {
        (self.config.alphabetic && c.is_ascii_alphabetic())
            || (self.config.digit && c.is_numeric())
            || (self.config.letter && c.is_alphabetic())
    }
}

impl Filter for CharTypeFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut skipped = 0;
        let kept: Vec<Token> = tokens
            .filter_map(|mut token| {
                if !token.text.chars().any(|c| self.accepts(c)) {
                    skipped += token.position_increment;
                    return None;
                }
                token.position_increment += skipped;
                skipped = 0;
                Some(token)
            })
            .collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "char_type"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kept(config: CharTypeConfig, input: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = input
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, i))
            .collect();
        CharTypeFilter::new(config)
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_defaults_drop_symbols() {
        assert_eq!(
            kept(CharTypeConfig::default(), &["abc", "123", "東京", "!!", "-", "a-b"]),
            vec!["abc", "123", "東京", "a-b"]
        );
    }

    #[test]
    fn test_digits_only() {
        let config = CharTypeConfig {
            alphabetic: false,
            digit: true,
            letter: false,
        };
        assert_eq!(kept(config, &["abc", "r2d2", "東京"]), vec!["r2d2"]);
    }

    #[test]
    fn test_ascii_letters_only() {
        let config = CharTypeConfig {
            alphabetic: true,
            digit: false,
            letter: false,
        };
        assert_eq!(kept(config, &["abc", "123", "東京", "é"]), vec!["abc"]);
    }

    #[test]
    fn test_position_gap_kept() {
        let tokens = vec![Token::new("a", 0), Token::new("!", 1), Token::new("b", 2)];
        let result: Vec<Token> = CharTypeFilter::default()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].position_increment, 2);
    }
}
