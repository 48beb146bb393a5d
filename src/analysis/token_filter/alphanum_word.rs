//! Joins runs of adjacent alphanumeric tokens back into words.
//!
//! Unigram tokenizers split `"aa1 bb2"` into single characters. This filter
//! merges consecutive ASCII letter/digit tokens whose offsets touch, so the
//! stream carries `aa1` and `bb2` instead. Other tokens pass through and end a
//! run.
//!
//! ```text
//! a a 1 _ b b 2   ->   aa1 bb2
//! a a a 亜 a a a   ->   aaa 亜 aaa
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::{ExtensionError, Result};

pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaNumWordConfig {
    /// Longer words are truncated to this many characters.
    pub max_token_length: usize,
}

impl Default for AlphaNumWordConfig {
    fn default() -> Self {
        AlphaNumWordConfig {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlphaNumWordFilter {
    max_token_length: usize,
}

impl Default for AlphaNumWordFilter {
    fn default() -> Self {
        AlphaNumWordFilter {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

impl AlphaNumWordFilter {
    pub fn new(max_token_length: usize) -> Result<Self> {
        if max_token_length == 0 {
            return Err(ExtensionError::config("max_token_length must be at least 1"));
        }
        Ok(AlphaNumWordFilter { max_token_length })
    }

    pub fn from_config(config: &AlphaNumWordConfig) -> Result<Self> {
        Self::new(config.max_token_length)
    }

    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }

    fn is_alphanum(token: &Token) -> bool {
        !token.text.is_empty() && token.text.chars().all(|c| c.is_ascii_alphanumeric())
    }

    fn finish(&self, mut word: Token, chars: usize, merged: bool) -> Token {
        if chars > self.max_token_length {
            word.text = word.text.chars().take(self.max_token_length).collect();
        }
        if merged {
            word = word.with_token_type(TokenType::Alphanum);
        }
        word
    }
}

impl Filter for AlphaNumWordFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut output = Vec::new();
        // (word so far, its char count, whether anything was appended)
        let mut pending: Option<(Token, usize, bool)> = None;

        for token in tokens {
            if !Self::is_alphanum(&token) {
                if let Some((word, chars, merged)) = pending.take() {
                    output.push(self.finish(word, chars, merged));
                }
                output.push(token);
                continue;
            }

            let adjacent = pending
                .as_ref()
                .is_some_and(|(word, _, _)| word.end_offset == token.start_offset);
            if adjacent {
                if let Some((word, chars, merged)) = pending.as_mut() {
                    word.text.push_str(&token.text);
                    word.end_offset = token.end_offset;
                    *chars += token.text.len();
                    *merged = true;
                }
                continue;
            }

            if let Some((word, chars, merged)) = pending.take() {
                output.push(self.finish(word, chars, merged));
            }
            let chars = token.text.len();
            pending = Some((token, chars, false));
        }
        if let Some((word, chars, merged)) = pending {
            output.push(self.finish(word, chars, merged));
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphanum_word"
    }
}
