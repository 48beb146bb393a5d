//! Character n-gram tokenizer that keeps dictionary words whole.
//!
//! Input is first cut into blocks at delimiter characters. Inside a block,
//! the longest synonym source starting at the current character is emitted as
//! one token, followed by its targets at the same position. Text between
//! synonym words is split into overlapping n-grams; a run no longer than `n`
//! characters becomes a single token.
//!
//! ```text
//! synonyms: 東京, とうきょう        n = 2
//!
//! 東京都に行く
//! ├──┤                東京 (inc 1)   とうきょう (inc 0)
//!     └────────┘      都に  に行  行く
//! ```
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::tokenizer::Tokenizer;
//! use analysis_extension::analysis::tokenizer::ngram_synonym::NGramSynonymTokenizer;
//!
//! let tokenizer = NGramSynonymTokenizer::from_rules(2, ["東京, とうきょう"]).unwrap();
//! let texts: Vec<String> = tokenizer
//!     .tokenize("東京都に行く")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["東京", "とうきょう", "都に", "に行", "行く"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::synonym::{SynonymConfig, SynonymParser, SynonymTable};
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{ExtensionError, Result};
use crate::resource::ReloadableResource;

pub const DEFAULT_N: usize = 2;

/// Space, ideographic space, tab, CR and LF.
pub const DEFAULT_DELIMITERS: &str = " \u{3000}\t\n\r";

/// Settings for [`NGramSynonymTokenizer`]. Synonym settings sit at the same
/// level as `n` and `delimiters`; `ignore_case` defaults to `true` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NGramSynonymConfig {
    pub n: usize,
    pub delimiters: String,
    #[serde(flatten)]
    pub synonyms: SynonymConfig,
}

impl Default for NGramSynonymConfig {
    fn default() -> Self {
        NGramSynonymConfig {
            n: DEFAULT_N,
            delimiters: DEFAULT_DELIMITERS.to_string(),
            synonyms: SynonymConfig::default(),
        }
    }
}

/// N-gram tokenizer aware of a reloadable synonym table.
#[derive(Clone, Debug)]
pub struct NGramSynonymTokenizer {
    n: usize,
    delimiters: Vec<char>,
    synonyms: Arc<ReloadableResource<SynonymParser>>,
}

impl NGramSynonymTokenizer {
    /// Create a tokenizer. `n` must be at least 1.
    pub fn new(
        n: usize,
        delimiters: &str,
        synonyms: Arc<ReloadableResource<SynonymParser>>,
    ) -> Result<Self> {
        if n == 0 {
            return Err(ExtensionError::config("n must be at least 1"));
        }
        Ok(NGramSynonymTokenizer {
            n,
            delimiters: delimiters.chars().collect(),
            synonyms,
        })
    }

    pub fn from_config(config: &NGramSynonymConfig, base: Option<&Path>) -> Result<Self> {
        let synonyms = config.synonyms.build(base, true)?;
        Self::new(config.n, &config.delimiters, Arc::new(synonyms))
    }

    /// Tokenizer with default delimiters and literal, case-insensitive rules.
    pub fn from_rules<I, S>(n: usize, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_config(
            &NGramSynonymConfig {
                n,
                synonyms: SynonymConfig::with_rules(rules),
                ..Default::default()
            },
            None,
        )
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn resource(&self) -> &Arc<ReloadableResource<SynonymParser>> {
        &self.synonyms
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    fn tokenize_block(&self, block: &str, base: usize, table: Option<&SynonymTable>, out: &mut Output) {
        let mut run_start = 0;
        let mut pos = 0;

        while pos < block.len() {
            let found = table.and_then(|t| t.longest_prefix(&block[pos..]));
            match found {
                Some((len, entry)) => {
                    self.push_grams(&block[run_start..pos], base + run_start, out);

                    let word = &block[pos..pos + len];
                    let start = base + pos;
                    let end = start + len;
                    if entry.keep_original {
                        out.push(
                            Token::with_offsets(word, 0, start, end)
                                .with_token_type(WhitespaceTokenizer::detect_token_type(word)),
                            1,
                        );
                    }
                    for (i, target) in entry.targets.iter().enumerate() {
                        let increment = if i == 0 && !entry.keep_original { 1 } else { 0 };
                        out.push(
                            Token::with_offsets(target.join(" "), 0, start, end)
                                .with_token_type(TokenType::Synonym),
                            increment,
                        );
                    }

                    pos += len;
                    run_start = pos;
                }
                None => {
                    pos += block[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        self.push_grams(&block[run_start..], base + run_start, out);
    }

    fn push_grams(&self, run: &str, base: usize, out: &mut Output) {
        if run.is_empty() {
            return;
        }
        let bounds: Vec<usize> = run
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(run.len()))
            .collect();
        let chars = bounds.len() - 1;

        if chars <= self.n {
            out.push(
                Token::with_offsets(run, 0, base, base + run.len()).with_token_type(TokenType::Gram),
                1,
            );
            return;
        }
        for i in 0..=chars - self.n {
            let (start, end) = (bounds[i], bounds[i + self.n]);
            out.push(
                Token::with_offsets(&run[start..end], 0, base + start, base + end)
                    .with_token_type(TokenType::Gram),
                1,
            );
        }
    }
}

/// Collects tokens and assigns positions from increments.
#[derive(Default)]
struct Output {
    tokens: Vec<Token>,
    next_position: usize,
}

impl Output {
    fn push(&mut self, mut token: Token, increment: usize) {
        let increment = if self.tokens.is_empty() { 1 } else { increment };
        self.next_position += increment;
        token.position = self.next_position - 1;
        token.position_increment = increment;
        self.tokens.push(token);
    }
}

impl Tokenizer for NGramSynonymTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let current = self.synonyms.current_value();
        let table = (*current).as_ref();
        let mut out = Output::default();

        let mut block_start: Option<usize> = None;
        for (offset, c) in text.char_indices() {
            match (self.is_delimiter(c), block_start) {
                (true, Some(start)) => {
                    self.tokenize_block(&text[start..offset], start, table, &mut out);
                    block_start = None;
                }
                (false, None) => block_start = Some(offset),
                _ => {}
            }
        }
        if let Some(start) = block_start {
            self.tokenize_block(&text[start..], start, table, &mut out);
        }

        Ok(Box::new(out.tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram_synonym"
    }
}
