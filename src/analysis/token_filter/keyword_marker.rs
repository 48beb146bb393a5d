//! Keyword marking backed by a reloadable word list.
//!
//! Tokens found in the list get [`Token::keyword`] set, which makes
//! downstream stemmers leave them alone.

use std::path::Path;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::resource::{ReloadableResource, WordListConfig, WordListParser, WordSet};

/// Marks tokens listed in a reloadable keyword file as keywords.
#[derive(Clone, Debug)]
pub struct ReloadableKeywordMarkerFilter {
    keywords: Arc<ReloadableResource<WordListParser>>,
}

impl ReloadableKeywordMarkerFilter {
    pub fn new(keywords: Arc<ReloadableResource<WordListParser>>) -> Self {
        ReloadableKeywordMarkerFilter { keywords }
    }

    pub fn from_config(config: &WordListConfig, base: Option<&Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(config.build(base)?)))
    }

    /// Create a filter with a fixed, case-sensitive keyword list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Arc::new(ReloadableResource::fixed(
            WordSet::new(words, false),
            WordListParser::new(false),
        )))
    }

    pub fn resource(&self) -> &Arc<ReloadableResource<WordListParser>> {
        &self.keywords
    }
}

impl Filter for ReloadableKeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let keywords = self.keywords.current_value();
        if keywords.is_empty() {
            return Ok(tokens);
        }

        let marked: Vec<Token> = tokens
            .map(|token| {
                if !token.is_keyword() && keywords.contains(&token.text) {
                    token.mark_keyword()
                } else {
                    token
                }
            })
            .collect();
        Ok(Box::new(marked.into_iter()))
    }

    fn name(&self) -> &'static str {
        "reloadable_keyword_marker"
    }
}
