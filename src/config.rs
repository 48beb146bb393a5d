//! JSON analyzer configuration.
//!
//! An analyzer is described as a list of char filters, one tokenizer and a
//! list of token filters, each selected by its `type`:
//!
//! ```json
//! {
//!   "char_filters": [{ "type": "iteration_mark" }],
//!   "tokenizer": { "type": "ngram_synonym", "n": 2, "synonyms_path": "synonyms.txt" },
//!   "filters": [
//!     { "type": "lowercase" },
//!     { "type": "reloadable_stop", "stopwords_path": "stop.txt", "reload_interval": "30s" }
//!   ]
//! }
//! ```
//!
//! Relative dictionary paths resolve against the directory passed to
//! [`AnalyzerConfig::build`], normally the directory holding the config file.
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::analyzer::analyzer::Analyzer;
//! use analysis_extension::config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::from_json(
//!     r#"{"filters": [{"type": "lowercase"}, {"type": "reloadable_stop", "stopwords": ["the"]}]}"#,
//! )
//! .unwrap();
//! let analyzer = config.build(None).unwrap();
//!
//! let texts: Vec<String> = analyzer.analyze("The Quick fox").unwrap().map(|t| t.text).collect();
//! assert_eq!(texts, vec!["quick", "fox"]);
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::iteration_mark::{IterationMarkCharFilter, IterationMarkConfig};
use crate::analysis::char_filter::prolonged_sound_mark::{
    ProlongedSoundMarkCharFilter, ProlongedSoundMarkConfig,
};
use crate::analysis::synonym::SynonymConfig;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::alphanum_word::{AlphaNumWordConfig, AlphaNumWordFilter};
use crate::analysis::token_filter::char_type::{CharTypeConfig, CharTypeFilter};
use crate::analysis::token_filter::disable_graph::DisableGraphFilter;
use crate::analysis::token_filter::flexible_porter_stem::{FlexiblePorterStemFilter, PorterSteps};
use crate::analysis::token_filter::keyword_marker::ReloadableKeywordMarkerFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::reloadable_stop::ReloadableStopFilter;
use crate::analysis::token_filter::stop_affix::{Affix, StopAffixFilter};
use crate::analysis::token_filter::synonym::SynonymFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::ngram_synonym::{NGramSynonymConfig, NGramSynonymTokenizer};
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;
use crate::resource::WordListConfig;

/// Char filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CharFilterConfig {
    IterationMark(IterationMarkConfig),
    ProlongedSoundMark(ProlongedSoundMarkConfig),
}

/// Tokenizer selection; defaults to whitespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenizerConfig {
    #[default]
    Whitespace,
    NgramSynonym(NGramSynonymConfig),
}

/// Settings of the `reloadable_stop` filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopFilterConfig {
    #[serde(flatten)]
    pub words: WordListConfig,
    /// `false` keeps stop words in the stream, flagged as stopped.
    pub remove_stopped: bool,
}

impl Default for StopFilterConfig {
    fn default() -> Self {
        StopFilterConfig {
            words: WordListConfig::default(),
            remove_stopped: true,
        }
    }
}

/// Token filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    Lowercase,
    ReloadableStop(StopFilterConfig),
    ReloadableKeywordMarker(WordListConfig),
    Synonym(SynonymConfig),
    StopPrefix(WordListConfig),
    StopSuffix(WordListConfig),
    CharType(CharTypeConfig),
    AlphanumWord(AlphaNumWordConfig),
    FlexiblePorterStem(PorterSteps),
    DisableGraph,
}

/// A complete analyzer definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub name: Option<String>,
    pub char_filters: Vec<CharFilterConfig>,
    pub tokenizer: TokenizerConfig,
    pub filters: Vec<FilterConfig>,
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Read a JSON config file and build it, resolving dictionary paths
    /// against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PipelineAnalyzer> {
        let path = path.as_ref();
        let config = Self::from_file(path)?;
        config.build(path.parent())
    }

    /// Build the analyzer. Dictionaries given as inline lists are parsed now;
    /// dictionary files are read on first use.
    pub fn build(&self, base: Option<&Path>) -> Result<PipelineAnalyzer> {
        let mut analyzer = PipelineAnalyzer::new(self.tokenizer.build(base)?);
        for char_filter in &self.char_filters {
            analyzer = analyzer.add_char_filter(char_filter.build());
        }
        for filter in &self.filters {
            analyzer = analyzer.add_filter(filter.build(base)?);
        }
        if let Some(name) = &self.name {
            analyzer = analyzer.with_name(name.clone());
        }
        debug!(
            "built analyzer {} with {} char filters and {} filters",
            analyzer.label(),
            self.char_filters.len(),
            self.filters.len()
        );
        Ok(analyzer)
    }
}

impl CharFilterConfig {
    pub fn build(&self) -> Arc<dyn CharFilter> {
        match self {
            CharFilterConfig::IterationMark(config) => {
                Arc::new(IterationMarkCharFilter::with_config(*config))
            }
            CharFilterConfig::ProlongedSoundMark(config) => {
                Arc::new(ProlongedSoundMarkCharFilter::with_config(config))
            }
        }
    }
}

impl TokenizerConfig {
    pub fn build(&self, base: Option<&Path>) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerConfig::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerConfig::NgramSynonym(config) => {
                Arc::new(NGramSynonymTokenizer::from_config(config, base)?)
            }
        })
    }
}

impl FilterConfig {
    pub fn build(&self, base: Option<&Path>) -> Result<Arc<dyn Filter>> {
        Ok(match self {
            FilterConfig::Lowercase => Arc::new(LowercaseFilter::new()),
            FilterConfig::ReloadableStop(config) => Arc::new(
                ReloadableStopFilter::from_config(&config.words, base)?
                    .remove_stopped(config.remove_stopped),
            ),
            FilterConfig::ReloadableKeywordMarker(config) => {
                Arc::new(ReloadableKeywordMarkerFilter::from_config(config, base)?)
            }
            FilterConfig::Synonym(config) => Arc::new(SynonymFilter::from_config(config, base)?),
            FilterConfig::StopPrefix(config) => {
                Arc::new(StopAffixFilter::from_config(Affix::Prefix, config, base)?)
            }
            FilterConfig::StopSuffix(config) => {
                Arc::new(StopAffixFilter::from_config(Affix::Suffix, config, base)?)
            }
            FilterConfig::CharType(config) => Arc::new(CharTypeFilter::new(*config)),
            FilterConfig::AlphanumWord(config) => {
                Arc::new(AlphaNumWordFilter::from_config(config)?)
            }
            FilterConfig::FlexiblePorterStem(steps) => {
                Arc::new(FlexiblePorterStemFilter::new(*steps))
            }
            FilterConfig::DisableGraph => Arc::new(DisableGraphFilter::new()),
        })
    }
}
