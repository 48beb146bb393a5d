//! Synonym expansion backed by a reloadable synonym file.
//!
//! At each position the longest rule source matching the upcoming tokens is
//! replaced by a token graph built from the rule's targets (see
//! [`graph_builder`](crate::analysis::synonym::graph_builder)). Unmatched
//! tokens pass through unchanged. When no synonyms are loaded the whole stream
//! passes through.
//!
//! # Examples
//!
//! ```
//! use analysis_extension::analysis::token::Token;
//! use analysis_extension::analysis::token_filter::Filter;
//! use analysis_extension::analysis::token_filter::synonym::SynonymFilter;
//!
//! let filter = SynonymFilter::from_rules(["big, large"], true).unwrap();
//! let tokens = vec![Token::new("a", 0), Token::new("Big", 1), Token::new("dog", 2)];
//!
//! let texts: Vec<String> = filter
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["a", "Big", "large", "dog"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::analysis::synonym::graph_builder::build_graph_tokens;
use crate::analysis::synonym::{SynonymConfig, SynonymParser};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::resource::ReloadableResource;

/// Expands tokens with synonyms from a reloadable table.
#[derive(Clone, Debug)]
pub struct SynonymFilter {
    synonyms: Arc<ReloadableResource<SynonymParser>>,
}

impl SynonymFilter {
    pub fn new(synonyms: Arc<ReloadableResource<SynonymParser>>) -> Self {
        SynonymFilter { synonyms }
    }

    /// Create a filter from configuration. Case is respected unless the
    /// config sets `ignore_case`.
    pub fn from_config(config: &SynonymConfig, base: Option<&Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(config.build(base, false)?)))
    }

    /// Create a filter from literal simple-format rules.
    pub fn from_rules<I, S>(rules: I, ignore_case: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_config(&SynonymConfig::with_rules(rules).ignore_case(ignore_case), None)
    }

    pub fn resource(&self) -> &Arc<ReloadableResource<SynonymParser>> {
        &self.synonyms
    }
}

impl Filter for SynonymFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let current = self.synonyms.current_value();
        let Some(table) = (*current).as_ref() else {
            return Ok(tokens);
        };

        let input: Vec<Token> = tokens.collect();
        let mut output = Vec::with_capacity(input.len());
        let mut carry = 0;
        let mut i = 0;

        while i < input.len() {
            let window_end = (i + table.max_source_len()).min(input.len());
            let texts: Vec<&str> = input[i..window_end]
                .iter()
                .map(|t| t.text.as_str())
                .collect();

            match table.longest_match(&texts) {
                Some(found) => {
                    let matched = &input[i..i + found.len];
                    let mut graph = build_graph_tokens(matched, found.entry);

                    let consumed: usize = matched.iter().map(|t| t.position_increment).sum();
                    let advanced: usize = graph.iter().map(|t| t.position_increment).sum();
                    if let Some(first) = graph.first_mut() {
                        first.position_increment += carry;
                    }
                    carry = consumed.saturating_sub(advanced);

                    output.append(&mut graph);
                    i += found.len;
                }
                None => {
                    let mut token = input[i].clone();
                    token.position_increment += carry;
                    carry = 0;
                    output.push(token);
                    i += 1;
                }
            }
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::analysis::synonym::SynonymFormat;

    fn run(filter: &SynonymFilter, words: &[&str]) -> Vec<Token> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_expand_group() {
        let filter = SynonymFilter::from_rules(["a, b, c"], false).unwrap();
        let result = run(&filter, &["x", "b", "y"]);

        assert_eq!(texts(&result), vec!["x", "b", "a", "c", "y"]);
        assert_eq!(result[2].position_increment, 0);
        assert_eq!(result[3].position_increment, 0);
        assert_eq!(result[4].position_increment, 1);
    }

    #[test]
    fn test_one_way_rule_replaces() {
        let filter = SynonymFilter::from_rules(["a, b => c"], false).unwrap();

        assert_eq!(texts(&run(&filter, &["a", "b", "c"])), vec!["c", "c", "c"]);
    }

    #[test]
    fn test_longest_match_wins() {
        let filter = SynonymFilter::from_rules(
            ["new york => ny", "new york city => nyc"],
            true,
        )
        .unwrap();
        let result = run(&filter, &["New", "York", "City", "Hall"]);

        assert_eq!(texts(&result), vec!["nyc", "Hall"]);
        assert_eq!(result[0].position_length, 3);
        assert_eq!(result[1].position_increment, 3);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let filter = SynonymFilter::from_rules(["big, large"], false).unwrap();
        assert_eq!(texts(&run(&filter, &["Big"])), vec!["Big"]);
    }

    #[test]
    fn test_no_synonyms_pass_through() {
        let filter = SynonymFilter::from_config(&SynonymConfig::default(), None).unwrap();
        assert_eq!(texts(&run(&filter, &["a", "b"])), vec!["a", "b"]);
        assert!(!filter.resource().is_reloadable());
    }

    #[test]
    fn test_wordnet_file_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wn.pl");
        fs::write(&path, "s(1,1,'car',n,1,0).\ns(1,2,'auto',n,1,0).\n").unwrap();

        let config = SynonymConfig::with_path("wn.pl")
            .format(SynonymFormat::Wordnet)
            .reload_interval(Duration::from_millis(1));
        let filter = SynonymFilter::from_config(&config, Some(dir.path())).unwrap();
        assert_eq!(texts(&run(&filter, &["car"])), vec!["car", "auto"]);

        fs::write(&path, "s(1,1,'car',n,1,0).\ns(1,2,'motorcar',n,1,0).\n").unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(texts(&run(&filter, &["car"])), vec!["car", "motorcar"]);
    }

    #[test]
    fn test_filter_name() {
        let filter = SynonymFilter::from_config(&SynonymConfig::default(), None).unwrap();
        assert_eq!(filter.name(), "synonym");
    }
}
