//! Pipeline analyzer that combines char filters, a tokenizer and filters.
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: Normalize raw text
//! 2. Tokenizer: Splits text into tokens
//! 3. Token Filters: Applied sequentially in the order they were added
//!
//! Token offsets always refer to the text passed to [`Analyzer::analyze`];
//! edits made by char filters are undone through their [`Transformation`]s.
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::analyzer::analyzer::Analyzer;
//! use analysis_extension::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use analysis_extension::analysis::token_filter::lowercase::LowercaseFilter;
//! use analysis_extension::analysis::token_filter::reloadable_stop::ReloadableStopFilter;
//! use analysis_extension::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//! use std::sync::Arc;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(ReloadableStopFilter::from_words(vec!["the", "and"])))
//!     .with_name("my_custom_analyzer");
//!
//! let tokens: Vec<_> = analyzer.analyze("Hello THE world AND test").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::char_filter::{CharFilter, Transformation};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The configured name of this analyzer.
    pub fn label(&self) -> &str {
        &self.name
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Map an offset in filtered text back to the text before that filter ran.
    fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
        let mut corrected = offset as isize;
        // Transformations are ordered by position.
        for t in transformations {
            let original_len = (t.original_end - t.original_start) as isize;
            let new_len = (t.new_end - t.new_start) as isize;

            if offset >= t.new_end {
                corrected += original_len - new_len;
            } else if offset >= t.new_start {
                // Inside a rewritten span: interpolate linearly.
                let offset_in_new = (offset - t.new_start) as isize;
                return t.original_start + (offset_in_new * original_len / new_len) as usize;
            } else {
                break;
            }
        }
        corrected.max(0) as usize
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut filtered_text = text.to_string();
        let mut filter_transformations = Vec::with_capacity(self.char_filters.len());

        for char_filter in &self.char_filters {
            let (new_text, transformations) = char_filter.filter(&filtered_text);
            filtered_text = new_text;
            filter_transformations.push(transformations);
        }

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        if filter_transformations.iter().all(Vec::is_empty) {
            return Ok(tokens);
        }

        // Final -> Filter N -> ... -> Filter 1 -> Original
        let corrected: Vec<_> = tokens
            .map(|mut token| {
                for transformations in filter_transformations.iter().rev() {
                    token.start_offset = Self::correct_offset(token.start_offset, transformations);
                    token.end_offset = Self::correct_offset(token.end_offset, transformations);
                }
                token
            })
            .collect();
        Ok(Box::new(corrected.into_iter()))
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::iteration_mark::IterationMarkCharFilter;
    use crate::analysis::char_filter::prolonged_sound_mark::ProlongedSoundMarkCharFilter;
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::token_filter::reloadable_stop::ReloadableStopFilter;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    #[test]
    fn test_pipeline_analyzer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(ReloadableStopFilter::from_words(vec![
                "the", "and",
            ])));

        let tokens: Vec<Token> = analyzer
            .analyze("Hello THE world AND test")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
    }

    #[test]
    fn test_pipeline_with_char_filter() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(IterationMarkCharFilter::default()));

        let tokens: Vec<Token> = analyzer.analyze("佐々木 さん").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "佐佐木");
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 9);
    }

    #[test]
    fn test_offset_correction_for_longer_replacement() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(ProlongedSoundMarkCharFilter::default()));

        // "-" (1 byte) becomes "ー" (3 bytes)
        let tokens: Vec<Token> = analyzer.analyze("ラ-メン 大盛").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "ラーメン");
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 10);
        assert_eq!(tokens[1].start_offset, 11);
        assert_eq!(tokens[1].end_offset, 17);
    }

    #[test]
    fn test_correct_offset_inside_span() {
        let transformations = [Transformation::new(2, 3, 2, 8)];
        assert_eq!(PipelineAnalyzer::correct_offset(1, &transformations), 1);
        assert_eq!(PipelineAnalyzer::correct_offset(5, &transformations), 2);
        assert_eq!(PipelineAnalyzer::correct_offset(8, &transformations), 3);
        assert_eq!(PipelineAnalyzer::correct_offset(10, &transformations), 5);
    }

    #[test]
    fn test_pipeline_label() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));
        assert_eq!(analyzer.label(), "pipeline_whitespace");
        assert_eq!(analyzer.with_name("custom").label(), "custom");
    }
}
