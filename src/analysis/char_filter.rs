//! Char filter implementations for text normalization.
//!
//! This module provides filters that pre-process the text string before it is
//! passed to the tokenizer.
//!
//! # Available Filters
//!
//! - [`iteration_mark::IterationMarkCharFilter`] - Japanese iteration mark expansion
//! - [`prolonged_sound_mark::ProlongedSoundMarkCharFilter`] - Dash to prolonged sound mark
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::char_filter::CharFilter;
//! use analysis_extension::analysis::char_filter::iteration_mark::IterationMarkCharFilter;
//!
//! let (text, transformations) = IterationMarkCharFilter::default().filter("時々");
//! assert_eq!(text, "時時");
//! assert_eq!(transformations.len(), 1);
//! ```

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before tokenization.
///
/// Implementations can modify the text content and return the modified text
/// along with a list of transformations that occurred.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// # Arguments
    ///
    /// * `input` - The input text to filter
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// - The filtered text.
    /// - A vector of `Transformation`s describing changes made.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod iteration_mark;
pub mod prolonged_sound_mark;
