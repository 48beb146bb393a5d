//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → … → Filter N → Token Stream
//! ```
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::analyzer::analyzer::Analyzer;
//! use analysis_extension::analysis::token::TokenStream;
//! use analysis_extension::error::Result;
//!
//! struct Silent;
//!
//! impl Analyzer for Silent {
//!     fn analyze(&self, _text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "silent"
//!     }
//! }
//!
//! assert_eq!(Silent.analyze("anything").unwrap().count(), 0);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are shared between analysis threads, hence `Send + Sync`.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
