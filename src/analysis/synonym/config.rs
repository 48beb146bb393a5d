//! Configuration for synonym-table backed components.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::synonym::parser::{SynonymFormat, SynonymParser};
use crate::error::Result;
use crate::resource::config::resolve_source;
use crate::resource::{ReloadInterval, ReloadableResource, ResourceSource};

/// Where synonym rules come from and how they are read.
///
/// ```json
/// { "synonyms_path": "synonyms.txt", "format": "wordnet", "expand": false }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymConfig {
    /// Synonym file, relative to the configuration directory unless absolute.
    #[serde(alias = "synonyms_path")]
    pub path: Option<PathBuf>,

    /// Literal rules, one per entry, used instead of a file.
    pub synonyms: Option<Vec<String>>,

    pub format: SynonymFormat,

    /// Whether comma groups are mutual (`true`) or contract to the first term.
    pub expand: bool,

    /// Unset means the consumer's default.
    pub ignore_case: Option<bool>,

    /// Minimum time between modification checks; defaults to one minute.
    pub reload_interval: Option<ReloadInterval>,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        SynonymConfig {
            path: None,
            synonyms: None,
            format: SynonymFormat::Simple,
            expand: true,
            ignore_case: None,
            reload_interval: None,
        }
    }
}

impl SynonymConfig {
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        SynonymConfig {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SynonymConfig {
            synonyms: Some(rules.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn format(mut self, format: SynonymFormat) -> Self {
        self.format = format;
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = Some(ignore_case);
        self
    }

    pub fn reload_interval<I: Into<ReloadInterval>>(mut self, interval: I) -> Self {
        self.reload_interval = Some(interval.into());
        self
    }

    /// Resolve the configured source; relative paths are joined onto `base`.
    pub fn source(&self, base: Option<&Path>) -> Result<ResourceSource> {
        resolve_source(self.path.as_deref(), self.synonyms.as_deref(), base)
    }

    /// Build the reloadable table. `default_ignore_case` applies when the
    /// config leaves `ignore_case` unset.
    pub fn build(
        &self,
        base: Option<&Path>,
        default_ignore_case: bool,
    ) -> Result<ReloadableResource<SynonymParser>> {
        let interval = ReloadInterval::resolve(self.reload_interval.as_ref())?;
        let parser = SynonymParser::new(
            self.format,
            self.expand,
            self.ignore_case.unwrap_or(default_ignore_case),
        );
        let source = self.source(base)?;
        let resource = ReloadableResource::new(source, interval, parser)?;

        match resource.path() {
            Some(path) => {
                if resource.current_value().is_none() {
                    warn!("synonym file {} is empty or missing", path.display());
                }
            }
            None if self.synonyms.is_some() && resource.current_value().is_none() => {
                warn!("inline synonyms are empty");
            }
            None => debug!("no synonym data configured"),
        }
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::ExtensionError;

    #[test]
    fn test_deserialize() {
        let config: SynonymConfig = serde_json::from_str(
            r#"{"synonyms_path": "syn.txt", "format": "wordnet", "expand": false, "reload_interval": 1000}"#,
        )
        .unwrap();

        assert_eq!(config.path, Some(PathBuf::from("syn.txt")));
        assert_eq!(config.format, SynonymFormat::Wordnet);
        assert!(!config.expand);
        assert_eq!(config.ignore_case, None);
    }

    #[test]
    fn test_defaults() {
        let config: SynonymConfig = serde_json::from_str("{}").unwrap();
        assert!(config.expand);
        assert_eq!(config.format, SynonymFormat::Simple);

        let resource = config.build(None, false).unwrap();
        assert!(!resource.is_reloadable());
        assert!(resource.current_value().is_none());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: std::result::Result<SynonymConfig, _> =
            serde_json::from_str(r#"{"format": "xml"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_inline_rules() {
        let resource = SynonymConfig::with_rules(["Foo, Bar"])
            .build(None, true)
            .unwrap();

        let table = resource.current_value();
        let table = (*table).as_ref().unwrap();
        assert!(table.lookup(&["FOO"]).is_some());
    }

    #[test]
    fn test_bad_inline_rule_fails_construction() {
        let result = SynonymConfig::with_rules(["a => b => c"]).build(None, false);
        assert!(matches!(result, Err(ExtensionError::Parse(_))));
    }

    #[test]
    fn test_file_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("syn.txt"), "big, large\n").unwrap();

        let resource = SynonymConfig::with_path("syn.txt")
            .build(Some(dir.path()), false)
            .unwrap();

        assert!(resource.is_reloadable());
        let table = resource.current_value();
        assert_eq!((*table).as_ref().map(|t| t.len()), Some(2));
    }
}
