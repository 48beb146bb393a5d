//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by a tokenizer and modify, remove, or
//! add tokens.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`reloadable_stop::ReloadableStopFilter`] - Removes words listed in a reloadable file
//! - [`keyword_marker::ReloadableKeywordMarkerFilter`] - Protects words listed in a reloadable file
//! - [`synonym::SynonymFilter`] - Expands synonyms from a reloadable synonym file
//! - [`stop_affix::StopAffixFilter`] - Removes tokens starting or ending with a listed word
//! - [`alphanum_word::AlphaNumWordFilter`] - Joins adjacent alphanumeric unigrams into words
//! - [`char_type::CharTypeFilter`] - Keeps tokens containing selected character classes
//! - [`flexible_porter_stem::FlexiblePorterStemFilter`] - Porter stemmer with switchable steps
//! - [`disable_graph::DisableGraphFilter`] - Flattens multi-position tokens
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::token_filter::Filter;
//! use analysis_extension::analysis::token_filter::lowercase::LowercaseFilter;
//! use analysis_extension::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Lowercase → Keyword Marker → Stop Words → Stemmer
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
/// Filters backed by a reloadable dictionary fetch its current value once per
/// call to [`filter`](Filter::filter), so every token of one stream sees the
/// same dictionary.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use analysis_extension::analysis::token::{Token, TokenStream};
/// use analysis_extension::analysis::token_filter::Filter;
/// use analysis_extension::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphanum_word;
pub mod char_type;
pub mod disable_graph;
pub mod flexible_porter_stem;
pub mod keyword_marker;
pub mod lowercase;
pub mod reloadable_stop;
pub mod stop_affix;
pub mod synonym;
