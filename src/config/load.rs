//! Layered config loading with provenance
//!
//! Builds the effective configuration from up to three layers (built-in
//! recommended config, project config file, CLI overrides) and records
//! where each layer came from, including a digest of file contents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::merge::merge_layers;
use super::{ConfigError, FormatterConfig};

/// Schema version for the loaded-config snapshot
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "fmtrc/loaded_config@1";

/// Project config file names probed in order when no explicit path is given
const CONFIG_FILE_CANDIDATES: &[&str] = &["fmtrc.json", ".fmtrc.json", "fmtrc.toml"];

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    Project,
    Cli,
}

/// A contributing config layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// The merged configuration plus where each layer came from.
///
/// Loaded once, never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedConfig {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged, validated configuration
    pub config: FormatterConfig,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl LoadedConfig {
    /// Build the effective config from the given layers.
    pub fn build(
        project_config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: built-in recommended config
        let builtin = serde_json::to_value(FormatterConfig::recommended())
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        layers.push(builtin);
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: project config file
        if let Some(path) = project_config_path {
            let (value, digest) = Self::load_config_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Project,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 3: CLI overrides
        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let config = FormatterConfig::from_value(merged)?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            config,
            sources,
        })
    }

    /// Build the effective config for a project root: use the explicit
    /// config path when given, otherwise probe the standard file names
    /// under `root`.
    pub fn discover(
        root: &Path,
        explicit_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::build(Some(path), cli_overrides);
        }

        let found = discover_config_file(root);
        Self::build(found.as_deref(), cli_overrides)
    }

    /// Read and parse a config file as a JSON value, returning the value
    /// and the digest of the raw bytes.
    fn load_config_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::Parse(format!("invalid UTF-8: {}", e)))?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let value = if is_toml {
            let toml_value: toml::Value = toml::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
            toml_to_json(toml_value)
        } else {
            serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?
        };

        Ok((value, digest))
    }

    /// Serialize the snapshot to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Probe the standard config file names under `root`, returning the first
/// that exists. Every command that accepts a project root resolves the
/// config file through this.
pub fn discover_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

/// Convert a TOML value to a JSON value for merging.
pub(crate) fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}
