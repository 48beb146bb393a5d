//! Configuration for word-list backed resources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtensionError, Result};
use crate::resource::interval::ReloadInterval;
use crate::resource::reloadable::{ReloadableResource, ResourceSource};
use crate::resource::word_list::WordListParser;

/// Where a word list comes from and how it is normalized.
///
/// ```json
/// { "path": "stopwords.txt", "reload_interval": "500ms", "ignore_case": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordListConfig {
    /// Word-list file, relative to the configuration directory unless absolute.
    #[serde(alias = "stopwords_path", alias = "keywords_path", alias = "words_path")]
    pub path: Option<PathBuf>,

    /// Literal words, used instead of a file.
    #[serde(alias = "stopwords", alias = "keywords")]
    pub words: Option<Vec<String>>,

    /// Minimum time between modification checks; defaults to one minute.
    pub reload_interval: Option<ReloadInterval>,

    pub ignore_case: bool,
}

impl WordListConfig {
    /// Config polling `path`.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        WordListConfig {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Config with literal words.
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordListConfig {
            words: Some(words.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn reload_interval<I: Into<ReloadInterval>>(mut self, interval: I) -> Self {
        self.reload_interval = Some(interval.into());
        self
    }

    /// Resolve the configured source; relative paths are joined onto `base`.
    pub fn source(&self, base: Option<&Path>) -> Result<ResourceSource> {
        resolve_source(self.path.as_deref(), self.words.as_deref(), base)
    }

    /// Build the reloadable word set described by this config.
    pub fn build(&self, base: Option<&Path>) -> Result<ReloadableResource<WordListParser>> {
        let interval = ReloadInterval::resolve(self.reload_interval.as_ref())?;
        ReloadableResource::new(
            self.source(base)?,
            interval,
            WordListParser::new(self.ignore_case),
        )
    }
}

/// Turn an optional path and optional inline lines into a source.
///
/// Configuring both is rejected so the effective dictionary is never ambiguous.
pub fn resolve_source(
    path: Option<&Path>,
    lines: Option<&[String]>,
    base: Option<&Path>,
) -> Result<ResourceSource> {
    match (path, lines) {
        (Some(_), Some(_)) => Err(ExtensionError::config(
            "a dictionary path and inline entries cannot both be configured",
        )),
        (Some(path), None) => {
            if path.as_os_str().is_empty() {
                return Err(ExtensionError::config("dictionary path must not be empty"));
            }
            Ok(ResourceSource::File(resolve_path(path, base)))
        }
        (None, Some(lines)) => Ok(ResourceSource::Inline(lines.to_vec())),
        (None, None) => Ok(ResourceSource::None),
    }
}

fn resolve_path(path: &Path, base: Option<&Path>) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_relative_path_joined_to_base() {
        let config = WordListConfig::with_path("stop.txt");
        let source = config.source(Some(Path::new("/etc/analysis"))).unwrap();
        assert_eq!(
            source,
            ResourceSource::File(PathBuf::from("/etc/analysis/stop.txt"))
        );
    }

    #[test]
    fn test_absolute_path_kept() {
        let config = WordListConfig::with_path("/dicts/stop.txt");
        let source = config.source(Some(Path::new("/etc/analysis"))).unwrap();
        assert_eq!(source, ResourceSource::File(PathBuf::from("/dicts/stop.txt")));
    }

    #[test]
    fn test_path_and_words_conflict() {
        let config = WordListConfig {
            path: Some("stop.txt".into()),
            words: Some(vec!["a".into()]),
            ..Default::default()
        };
        assert!(matches!(config.source(None), Err(ExtensionError::Config(_))));
    }

    #[test]
    fn test_deserialize_with_consumer_keys() {
        let config: WordListConfig = serde_json::from_str(
            r#"{"stopwords_path": "stop.txt", "reload_interval": "500ms", "ignore_case": true}"#,
        )
        .unwrap();

        assert_eq!(config.path, Some(PathBuf::from("stop.txt")));
        assert!(config.ignore_case);

        let resource = config.build(None).unwrap();
        assert!(resource.is_reloadable());
        assert_eq!(resource.reload_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_interval_is_config_error() {
        let config = WordListConfig::with_path("stop.txt").reload_interval(ReloadInterval::Text(
            "soon".to_string(),
        ));
        assert!(matches!(config.build(None), Err(ExtensionError::Config(_))));
    }

    #[test]
    fn test_inline_words_build_static_set() {
        let resource = WordListConfig::with_words(["The", "A"])
            .ignore_case(true)
            .build(None)
            .unwrap();

        assert!(!resource.is_reloadable());
        assert!(resource.current_value().contains("the"));
    }

    #[test]
    fn test_nothing_configured_is_noop() {
        let resource = WordListConfig::default().build(None).unwrap();
        assert!(!resource.is_reloadable());
        assert!(resource.current_value().is_empty());
    }
}
