//! Host configuration.
//!
//! Loaded from a JSON file; every field is optional and falls back to
//! [`AppConfig::default`]. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration for a gyrocompass session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Recorded sample stream to replay; `None` reads stdin.
    pub input: Option<PathBuf>,
    /// Print a status line every N updates (0 disables rendering).
    pub render_every: u32,
    /// Stop after this many events (`None` = until the source is exhausted).
    pub max_events: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: None,
            render_every: 1,
            max_events: None,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_events == Some(0) {
            return Err(ConfigError::Invalid(
                "max_events must be at least 1 when set".to_string(),
            ));
        }
        if let Some(input) = &self.input {
            if input.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("input path is empty".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.input, None);
        assert_eq!(config.render_every, 1);
        assert_eq!(config.max_events, None);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(r#"{"render_every": 10, "input": "run.jsonl"}"#).unwrap();
        assert_eq!(config.render_every, 10);
        assert_eq!(config.input, Some(PathBuf::from("run.jsonl")));
        assert_eq!(config.max_events, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = AppConfig::from_json(r#"{"sample_rate": 5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_max_events_rejected() {
        let err = AppConfig::from_json(r#"{"max_events": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = AppConfig::from_json(r#"{"input": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
