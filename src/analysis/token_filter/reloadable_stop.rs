//! Stop word removal backed by a reloadable word list.
//!
//! The stop word file is checked for modification at most once per reload
//! interval, at the start of a token stream. Editing the file changes what is
//! removed without rebuilding the analyzer. When no file is configured the
//! filter passes tokens through unchanged.
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::token_filter::Filter;
//! use analysis_extension::analysis::token_filter::reloadable_stop::ReloadableStopFilter;
//! use analysis_extension::analysis::token::Token;
//!
//! let filter = ReloadableStopFilter::from_words(vec!["the", "and"]);
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("and", 2),
//!     Token::new("brown", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! assert_eq!(result[1].text, "brown");
//! assert_eq!(result[1].position_increment, 2);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::resource::{ReloadableResource, WordListConfig, WordListParser, WordSet};

/// A filter that removes (or marks) tokens found in a reloadable word list.
///
/// Removed tokens add their position increment to the next kept token, so
/// phrase distances across a removed word are preserved.
#[derive(Clone, Debug)]
pub struct ReloadableStopFilter {
    stop_words: Arc<ReloadableResource<WordListParser>>,
    remove_stopped: bool,
}

impl ReloadableStopFilter {
    /// Create a filter over an existing resource.
    pub fn new(stop_words: Arc<ReloadableResource<WordListParser>>) -> Self {
        ReloadableStopFilter {
            stop_words,
            remove_stopped: true,
        }
    }

    /// Create a filter from configuration; relative paths resolve against `base`.
    pub fn from_config(config: &WordListConfig, base: Option<&Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(config.build(base)?)))
    }

    /// Create a filter with a fixed, case-sensitive stop word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = WordSet::new(words, false);
        Self::new(Arc::new(ReloadableResource::fixed(
            set,
            WordListParser::new(false),
        )))
    }

    /// Keep stop words in the stream, marked as stopped, instead of removing them.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// The backing resource.
    pub fn resource(&self) -> &Arc<ReloadableResource<WordListParser>> {
        &self.stop_words
    }
}

impl Filter for ReloadableStopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = self.stop_words.current_value();
        if stop_words.is_empty() {
            return Ok(tokens);
        }

        let mut skipped = 0;
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|mut token| {
                if !token.is_stopped() && stop_words.contains(&token.text) {
                    if self.remove_stopped {
                        skipped += token.position_increment;
                        return None;
                    }
                    return Some(token.stop());
                }
                token.position_increment += skipped;
                skipped = 0;
                Some(token)
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "reloadable_stop"
    }
}
