//! Reload interval settings.
//!
//! Intervals are written either as an integer number of milliseconds or as a
//! string with a unit suffix (`500ms`, `1s`, `5m`, `2h`, `1d`). A missing or
//! zero interval falls back to [`DEFAULT_RELOAD_INTERVAL`]; it never means
//! "check on every access".

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ExtensionError, Result};

/// Interval used when none (or zero) is configured.
pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(60);

/// A reload interval as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReloadInterval {
    /// Plain milliseconds, e.g. `500`
    Millis(u64),
    /// Number with a unit suffix, e.g. `"500ms"`
    Text(String),
}

impl ReloadInterval {
    /// Parse the setting into a duration (zero is returned as zero).
    pub fn to_duration(&self) -> Result<Duration> {
        match self {
            ReloadInterval::Millis(millis) => Ok(Duration::from_millis(*millis)),
            ReloadInterval::Text(text) => parse_duration(text),
        }
    }

    /// Effective interval for an optional setting, applying the default.
    pub fn resolve(setting: Option<&ReloadInterval>) -> Result<Duration> {
        let interval = match setting {
            Some(setting) => setting.to_duration()?,
            None => Duration::ZERO,
        };
        Ok(effective_interval(interval))
    }
}

impl From<Duration> for ReloadInterval {
    fn from(duration: Duration) -> Self {
        ReloadInterval::Millis(duration.as_millis() as u64)
    }
}

impl fmt::Display for ReloadInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadInterval::Millis(millis) => write!(f, "{millis}ms"),
            ReloadInterval::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Replace a zero interval with the default.
pub fn effective_interval(interval: Duration) -> Duration {
    if interval.is_zero() {
        DEFAULT_RELOAD_INTERVAL
    } else {
        interval
    }
}

/// Parse `"<digits><unit>"` where unit is one of `ms`, `s`, `m`, `h`, `d`.
///
/// A bare number is read as milliseconds.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let text = text.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(split);

    if digits.is_empty() {
        return Err(ExtensionError::config(format!(
            "failed to parse reload interval [{text}]: missing number"
        )));
    }
    let value: u64 = digits.parse().map_err(|e| {
        ExtensionError::config(format!("failed to parse reload interval [{text}]: {e}"))
    })?;

    let seconds_per_unit = match unit.trim() {
        "" | "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 60 * 60 * 24,
        other => {
            return Err(ExtensionError::config(format!(
                "failed to parse reload interval [{text}]: unknown unit [{other}]"
            )));
        }
    };
    let seconds = value.checked_mul(seconds_per_unit).ok_or_else(|| {
        ExtensionError::config(format!(
            "failed to parse reload interval [{text}]: value too large"
        ))
    })?;
    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86400));
        assert_eq!(parse_duration("250").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(
            parse_duration("fast"),
            Err(ExtensionError::Config(_))
        ));
        assert!(parse_duration("10 weeks").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_parse_duration_rejects_overflow() {
        assert!(matches!(
            parse_duration("999999999999999999d"),
            Err(ExtensionError::Config(_))
        ));
        assert!(matches!(
            parse_duration("999999999999999999999s"),
            Err(ExtensionError::Config(_))
        ));
        assert_eq!(
            parse_duration("18446744073709551615s").unwrap(),
            Duration::from_secs(u64::MAX)
        );
        let huge = ReloadInterval::Text("999999999999999999h".to_string());
        assert!(ReloadInterval::resolve(Some(&huge)).is_err());
    }

    #[test]
    fn test_zero_and_absent_fall_back_to_default() {
        assert_eq!(
            ReloadInterval::resolve(None).unwrap(),
            DEFAULT_RELOAD_INTERVAL
        );
        assert_eq!(
            ReloadInterval::resolve(Some(&ReloadInterval::Millis(0))).unwrap(),
            DEFAULT_RELOAD_INTERVAL
        );
        assert_eq!(
            ReloadInterval::resolve(Some(&ReloadInterval::Text("0s".to_string()))).unwrap(),
            DEFAULT_RELOAD_INTERVAL
        );
        assert_eq!(
            ReloadInterval::resolve(Some(&ReloadInterval::Text("500ms".to_string()))).unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_deserialize_both_forms() {
        let millis: ReloadInterval = serde_json::from_str("1500").unwrap();
        assert_eq!(millis, ReloadInterval::Millis(1500));

        let text: ReloadInterval = serde_json::from_str("\"1s\"").unwrap();
        assert_eq!(text.to_duration().unwrap(), Duration::from_secs(1));
    }
}
