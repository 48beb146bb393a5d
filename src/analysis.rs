//! Text analysis components.
//!
//! Char filters rewrite the raw text, a tokenizer splits it, and token filters
//! transform the resulting stream. Components that depend on an external
//! dictionary hold a [`ReloadableResource`](crate::resource::ReloadableResource)
//! and fetch its current value once per analyzed text, so an edited stop-word
//! or synonym file takes effect without rebuilding the analyzer.

pub mod analyzer;
pub mod char_filter;
pub mod synonym;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
