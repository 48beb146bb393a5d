//! Command line interface for inspecting analyzers and dictionaries.

pub mod args;
pub mod commands;
pub mod output;

pub use args::*;
pub use commands::*;
pub use output::*;
