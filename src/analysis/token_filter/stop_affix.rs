//! Removal of tokens that start or end with a listed word.
//!
//! Useful after n-gram style tokenization, where a particle glued to a content
//! word produces grams such as `京の` that should not be indexed.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::resource::{ReloadableResource, WordListConfig, WordListParser, WordSet};

/// Which end of the token is compared against the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affix {
    Prefix,
    Suffix,
}

/// Drops tokens that start (or end) with any word in the list.
#[derive(Clone, Debug)]
pub struct StopAffixFilter {
    affix: Affix,
    words: Arc<ReloadableResource<WordListParser>>,
}

impl StopAffixFilter {
    pub fn new(affix: Affix, words: Arc<ReloadableResource<WordListParser>>) -> Self {
        StopAffixFilter { affix, words }
    }

    pub fn from_config(affix: Affix, config: &WordListConfig, base: Option<&Path>) -> Result<Self> {
        Ok(Self::new(affix, Arc::new(config.build(base)?)))
    }

    pub fn from_words<I, S>(affix: Affix, words: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            affix,
            Arc::new(ReloadableResource::fixed(
                WordSet::new(words, ignore_case),
                WordListParser::new(ignore_case),
            )),
        )
    }

    pub fn affix(&self) -> Affix {
        self.affix
    }

    fn is_stopped(&self, words: &WordSet, token: &Token) -> bool {
        let lowered;
        let text = if words.ignore_case() {
            lowered = token.text.to_lowercase();
            lowered.as_str()
        } else {
            token.text.as_str()
        };

        words.iter().any(|word| match self.affix {
            Affix::Prefix => text.starts_with(word),
            Affix::Suffix => text.ends_with(word),
        })
    }
}

impl Filter for StopAffixFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words = self.words.current_value();
        if words.is_empty() {
            return Ok(tokens);
        }

        let mut skipped = 0;
        let kept: Vec<Token> = tokens
            .filter_map(|mut token| {
                if self.is_stopped(&words, &token) {
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
        match self.affix {
            Affix::Prefix => "stop_prefix",
            Affix::Suffix => "stop_suffix",
        }
    }
}
