//! Error types for the analysis extension.
//!
//! All fallible operations return [`ExtensionError`] through the crate-wide
//! [`Result`] alias. Errors raised while *reloading* a dictionary never reach
//! analysis callers: the reload path logs them and keeps the last good value.
//!
//! # Examples
//!
//! ```
//! use analysis_extension::error::{ExtensionError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ExtensionError::config("reload_interval must not be negative"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for analysis extension operations.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// I/O errors (dictionary files, configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid component or resource configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed dictionary or synonym rule text
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with ExtensionError.
pub type Result<T> = std::result::Result<T, ExtensionError>;

impl ExtensionError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ExtensionError::Config(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        ExtensionError::Parse(msg.into())
    }
}
