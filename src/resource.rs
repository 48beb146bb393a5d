//! Reloadable dictionary resources.
//!
//! Several analysis components read an external word list or synonym file. This
//! module keeps that file fresh without a background thread: every access asks
//! the [`ReloadableResource`] for its current value, and at most once per
//! reload interval the resource compares the file's modification time with the
//! one it last loaded and reparses when it moved forward.
//!
//! # Components
//!
//! - [`probe`] - File modification-time probe
//! - [`interval`] - Reload interval parsing and defaults
//! - [`reloadable`] - The generic check-on-access reload skeleton
//! - [`word_list`] - Word-list parser producing a [`WordSet`]
//! - [`config`] - Serde configuration for word-list backed resources
//!
//! # Examples
//!
//! ```
//! use analysis_extension::resource::{ReloadableResource, WordListParser};
//!
//! let resource = ReloadableResource::from_lines(
//!     vec!["the".to_string(), "# comment".to_string(), "a".to_string()],
//!     WordListParser::new(false),
//! )
//! .unwrap();
//!
//! let words = resource.current_value();
//! assert!(words.contains("the"));
//! assert_eq!(words.len(), 2);
//! assert!(!resource.is_reloadable());
//! ```

pub mod config;
pub mod interval;
pub mod probe;
pub mod reloadable;
pub mod word_list;

pub use config::WordListConfig;
pub use interval::{DEFAULT_RELOAD_INTERVAL, ReloadInterval};
pub use reloadable::{ReloadableResource, ResourceParser, ResourceSource};
pub use word_list::{WordListParser, WordSet};
