//! Synonym tables shared by the synonym filter and the n-gram synonym tokenizer.
//!
//! # Components
//!
//! - [`parser`] - Simple format parsing and the reloadable [`SynonymParser`]
//! - [`wordnet`] - WordNet prolog records
//! - [`table`] - FST-backed [`SynonymTable`] with longest-match lookup
//! - [`graph_builder`] - Stacking matched synonyms into a token graph
//! - [`config`] - Serde configuration for synonym resources
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::synonym::{SynonymFormat, SynonymParser};
//! use analysis_extension::resource::ResourceParser;
//!
//! let parser = SynonymParser::new(SynonymFormat::Simple, true, true);
//! let table = parser
//!     .parse("New York, NY\nsea biscit => seabiscuit")
//!     .unwrap()
//!     .unwrap();
//!
//! let found = table.longest_match(&["new", "york", "city"]).unwrap();
//! assert_eq!(found.len, 2);
//! assert_eq!(found.entry.targets, vec![vec!["ny".to_string()]]);
//! assert!(table.lookup(&["seabiscuit"]).is_none());
//! ```

pub mod config;
pub mod graph_builder;
pub mod parser;
pub mod table;
pub mod wordnet;

pub use config::SynonymConfig;
pub use parser::{SynonymFormat, SynonymParser, TermAnalyzer};
pub use table::{SynonymEntry, SynonymMatch, SynonymTable, SynonymTableBuilder};
