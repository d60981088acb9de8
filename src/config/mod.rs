//! Configuration model and loading
//!
//! The top-level config record is a base option patch flattened at the top
//! level of the file plus an ordered `overrides` array. Loading layers a
//! project config file over built-in defaults and under CLI overrides:
//! built-in defaults → project file → CLI overrides.

mod defaults;
mod load;
mod merge;

pub use load::{
    discover_config_file, ConfigOrigin, ConfigSource, LoadedConfig, SCHEMA_ID, SCHEMA_VERSION,
};
pub use merge::{deep_merge, merge_layers};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

use crate::options::OptionsPatch;
use crate::overrides::{OverrideRule, OverrideSet, PatternError};

/// Error types for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// The top-level formatter configuration: base options plus ordered
/// override rules. Immutable once loaded; the formatting engine reads it,
/// nothing mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Base options, written at the top level of the config file
    #[serde(flatten)]
    pub base: OptionsPatch,

    /// Ordered override rules; later matching rules take precedence over
    /// earlier ones and over the base for the keys they specify
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<OverrideRule>,
}

impl FormatterConfig {
    /// Load and parse a config file. The format is chosen by extension:
    /// `.toml` parses as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let value: toml::Value = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(load::toml_to_json(value))
    }

    /// Build a config from a JSON value, rejecting pattern fields at the
    /// top level and validating the result.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        if let Some(object) = value.as_object() {
            // The base section carries no pattern-matching fields; `files`
            // belongs inside an override entry.
            if object.contains_key("files") {
                return Err(ConfigError::Validation(
                    "'files' is not valid at the top level; move it into an 'overrides' entry"
                        .to_string(),
                ));
            }
        } else {
            return Err(ConfigError::Parse(
                "config root must be an object".to_string(),
            ));
        }

        let config: FormatterConfig =
            serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the structural rules:
    /// - every override's `files` is a non-empty pattern or pattern list;
    /// - every override's `options` specifies at least one key;
    /// - every glob pattern compiles;
    /// - widths, where specified, are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_widths(&self.base, "base config")?;

        for (index, rule) in self.overrides.iter().enumerate() {
            if rule.files.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "override {} has an empty 'files' pattern",
                    index
                )));
            }

            if rule.options.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "override {} ({}) specifies no options",
                    index,
                    rule.files.display()
                )));
            }

            Self::validate_widths(&rule.options, &format!("override {}", index))?;
        }

        // Compiling exercises every glob pattern
        OverrideSet::compile(&self.overrides)?;

        Ok(())
    }

    fn validate_widths(patch: &OptionsPatch, context: &str) -> Result<(), ConfigError> {
        if patch.print_width == Some(0) {
            return Err(ConfigError::Validation(format!(
                "{}: print_width must be positive",
                context
            )));
        }
        if patch.tab_width == Some(0) {
            return Err(ConfigError::Validation(format!(
                "{}: tab_width must be positive",
                context
            )));
        }
        Ok(())
    }

    /// Compile this config's override rules for matching.
    pub fn compile_overrides(&self) -> Result<OverrideSet, PatternError> {
        OverrideSet::compile(&self.overrides)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TrailingComma;

    #[test]
    fn test_parse_json_with_overrides() {
        let config = FormatterConfig::from_json_str(
            r#"{
                "print_width": 100,
                "single_quote": true,
                "overrides": [
                    {"files": "*.scss", "options": {"single_quote": false}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.base.print_width, Some(100));
        assert_eq!(config.overrides.len(), 1);
        assert_eq!(config.overrides[0].options.single_quote, Some(false));
    }

    #[test]
    fn test_parse_toml() {
        let config = FormatterConfig::from_toml_str(
            r#"
            print_width = 100
            trailing_comma = "all"

            [[overrides]]
            files = "*.vue"

            [overrides.options]
            tab_width = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.base.print_width, Some(100));
        assert_eq!(config.base.trailing_comma, Some(TrailingComma::All));
        assert_eq!(config.overrides[0].options.tab_width, Some(2));
    }

    #[test]
    fn test_top_level_files_rejected() {
        let err = FormatterConfig::from_json_str(r#"{"files": "*.vue"}"#).unwrap_err();
        assert!(err.to_string().contains("'files'"));
    }

    #[test]
    fn test_empty_override_options_rejected() {
        let err = FormatterConfig::from_json_str(
            r#"{"overrides": [{"files": "*.vue", "options": {}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no options"));
    }

    #[test]
    fn test_empty_files_rejected() {
        let err = FormatterConfig::from_json_str(
            r#"{"overrides": [{"files": [], "options": {"tab_width": 2}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty 'files'"));
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = FormatterConfig::from_json_str(r#"{"print_width": 0}"#).unwrap_err();
        assert!(err.to_string().contains("print_width"));

        let err = FormatterConfig::from_json_str(
            r#"{"overrides": [{"files": "*.vue", "options": {"tab_width": 0}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("tab_width"));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let err = FormatterConfig::from_json_str(
            r#"{"overrides": [{"files": "a{", "options": {"tab_width": 2}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Pattern(_)));
    }

    #[test]
    fn test_json_roundtrip_identical() {
        let config = FormatterConfig::recommended();

        let json = config.to_json().unwrap();
        let back = FormatterConfig::from_json_str(&json).unwrap();

        assert_eq!(back, config);
    }
}
