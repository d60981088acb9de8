//! Override rules - per-file-pattern option overrides
//!
//! An override rule pairs one or more glob patterns with a partial option
//! set that supersedes the base configuration for matching files. Rules are
//! ordered; matching is compiled down to glob sets once per config.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::options::OptionsPatch;

/// Errors from compiling override patterns
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid glob '{pattern}' in override {index}: {source}")]
    Glob {
        index: usize,
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A single glob pattern or a list of patterns.
///
/// Config files may write either `"files": "*.vue"` or
/// `"files": ["*.njk", "*.twig"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilePatterns {
    One(String),
    Many(Vec<String>),
}

impl FilePatterns {
    /// The patterns as a slice, regardless of shape.
    pub fn patterns(&self) -> &[String] {
        match self {
            FilePatterns::One(pattern) => std::slice::from_ref(pattern),
            FilePatterns::Many(patterns) => patterns,
        }
    }

    /// True when there is no usable pattern (empty list, or any pattern
    /// that is the empty string).
    pub fn is_empty(&self) -> bool {
        let patterns = self.patterns();
        patterns.is_empty() || patterns.iter().any(|p| p.is_empty())
    }

    /// Human-readable form for summaries and explain output.
    pub fn display(&self) -> String {
        self.patterns().join(", ")
    }
}

/// A file-pattern override: options that supersede the base configuration
/// for files matching `files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Glob pattern(s) selecting the files this rule applies to
    pub files: FilePatterns,

    /// Partial options applied on top of the base config (and earlier
    /// matching rules) for the keys they specify
    pub options: OptionsPatch,
}

/// One compiled rule: patterns containing a separator match the full path,
/// bare patterns like `*.vue` match the file name.
#[derive(Debug)]
struct CompiledRule {
    path_set: GlobSet,
    name_set: GlobSet,
}

impl CompiledRule {
    fn matches(&self, path: &Path) -> bool {
        if self.path_set.is_match(path) {
            return true;
        }
        match path.file_name() {
            Some(name) => self.name_set.is_match(name),
            None => false,
        }
    }
}

/// All of a config's override rules, compiled for matching.
#[derive(Debug)]
pub struct OverrideSet {
    rules: Vec<CompiledRule>,
}

impl OverrideSet {
    /// Compile the rules' patterns into glob sets, in listed order.
    pub fn compile(rules: &[OverrideRule]) -> Result<Self, PatternError> {
        let mut compiled = Vec::with_capacity(rules.len());

        for (index, rule) in rules.iter().enumerate() {
            let mut path_builder = GlobSetBuilder::new();
            let mut name_builder = GlobSetBuilder::new();

            for pattern in rule.files.patterns() {
                let glob = Glob::new(pattern).map_err(|source| PatternError::Glob {
                    index,
                    pattern: pattern.clone(),
                    source,
                })?;

                if pattern.contains('/') {
                    path_builder.add(glob);
                } else {
                    name_builder.add(glob);
                }
            }

            // GlobSetBuilder::build only fails on invalid globs, which were
            // already rejected by Glob::new above.
            let path_set = path_builder.build().map_err(|source| PatternError::Glob {
                index,
                pattern: rule.files.display(),
                source,
            })?;
            let name_set = name_builder.build().map_err(|source| PatternError::Glob {
                index,
                pattern: rule.files.display(),
                source,
            })?;

            compiled.push(CompiledRule { path_set, name_set });
        }

        Ok(Self { rules: compiled })
    }

    /// Indices of the rules matching `path`, in listed order.
    pub fn matching_indices(&self, path: &Path) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(path))
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether any rule matches `path`.
    pub fn matches(&self, path: &Path) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
