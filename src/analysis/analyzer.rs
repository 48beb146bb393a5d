//! Analyzers that combine char filters, a tokenizer and token filters.
//!
//! - [`analyzer::Analyzer`] - The analyzer trait
//! - [`pipeline::PipelineAnalyzer`] - Char filters, tokenizer and filter chain

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod pipeline;
