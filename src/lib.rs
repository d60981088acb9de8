//! fmtrc - formatter configuration front end
//!
//! This crate owns the configuration surface of a code-formatting tool:
//! the typed option model, config-file loading and layering, glob-based
//! override rules with last-match-wins resolution, and structural
//! validation. The formatting engine consuming the resolved options lives
//! elsewhere.

pub mod config;
pub mod options;
pub mod overrides;
pub mod resolve;

pub use config::{
    discover_config_file, ConfigError, ConfigOrigin, ConfigSource, FormatterConfig, LoadedConfig,
};
pub use options::{FormatterOptions, OptionsPatch, TrailingComma};
pub use overrides::{FilePatterns, OverrideRule, OverrideSet, PatternError};
pub use resolve::{ExplainOutput, OptionOrigin, ResolvedOptions, Resolver};
