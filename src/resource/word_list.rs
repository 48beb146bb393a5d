//! Word-list parsing.
//!
//! One word per line. Blank lines and lines whose first non-whitespace
//! character is `#` are ignored; surrounding whitespace is trimmed.

use std::collections::HashSet;

use crate::error::Result;
use crate::resource::reloadable::ResourceParser;

/// An immutable set of normalized words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
    ignore_case: bool,
}

impl WordSet {
    /// Build a set from words, lowercasing them when `ignore_case` is set.
    pub fn new<I, S>(words: I, ignore_case: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| normalize(word.as_ref(), ignore_case))
            .collect();
        WordSet { words, ignore_case }
    }

    /// Check membership, applying the same normalization as the stored words.
    pub fn contains(&self, word: &str) -> bool {
        if self.ignore_case {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    /// Whether lookups fold case.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the stored (normalized) words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn normalize(word: &str, ignore_case: bool) -> String {
    if ignore_case {
        word.to_lowercase()
    } else {
        word.to_string()
    }
}

/// Yield the meaningful lines of a word list.
pub fn word_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parser producing a [`WordSet`] from word-list text.
#[derive(Clone, Debug, Default)]
pub struct WordListParser {
    ignore_case: bool,
}

impl WordListParser {
    pub fn new(ignore_case: bool) -> Self {
        WordListParser { ignore_case }
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }
}

impl ResourceParser for WordListParser {
    type Output = WordSet;

    fn parse(&self, content: &str) -> Result<WordSet> {
        Ok(WordSet::new(word_lines(content), self.ignore_case))
    }

    fn name(&self) -> &'static str {
        "word_list"
    }
}
