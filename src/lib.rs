//! # analysis-extension
//!
//! Text analysis components whose dictionaries can change while the process
//! runs.
//!
//! ## Features
//!
//! - Word lists and synonym tables reloaded from disk when the file changes,
//!   checked at most once per interval on the analysis thread
//! - Synonym files in simple (`a, b => c`) and WordNet prolog formats
//! - FST-backed synonym table with multi-token longest match
//! - Reloadable stop, keyword-marker and synonym filters, an n-gram tokenizer
//!   that keeps synonyms whole, and Japanese char filters
//! - JSON analyzer configuration and a small inspection CLI

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod resource;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
