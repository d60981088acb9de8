//! Per-path option resolution
//!
//! Resolution starts from the built-in defaults, applies the base patch,
//! then applies each override rule whose patterns match the path, in listed
//! order. The last matching rule wins for the keys it specifies. Every
//! key's final origin is recorded for diagnostics.

mod explain;

pub use explain::ExplainOutput;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::FormatterConfig;
use crate::options::{FormatterOptions, OPTION_KEYS};
use crate::overrides::{OverrideSet, PatternError};

/// Where an option's final value came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionOrigin {
    /// Built-in default; nothing specified this key
    Default,
    /// The base section of the config
    Base,
    /// The last override rule that specified this key
    Override { index: usize, pattern: String },
}

/// A rule that matched the path, with the keys it applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedRule {
    /// Rule position in the config's `overrides` list
    pub index: usize,

    /// The rule's file patterns
    pub patterns: Vec<String>,

    /// Option keys this rule set
    pub keys: Vec<String>,
}

/// The effective options for one path, with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedOptions {
    /// The complete effective option set
    pub options: FormatterOptions,

    /// Rules that matched, in listed order
    pub matched: Vec<MatchedRule>,

    /// Per-key origin of the final value
    pub origins: BTreeMap<String, OptionOrigin>,
}

/// Resolves effective options for paths against one compiled config.
#[derive(Debug)]
pub struct Resolver {
    config: FormatterConfig,
    compiled: OverrideSet,
}

impl Resolver {
    /// Compile a config's override rules for resolution.
    pub fn new(config: FormatterConfig) -> Result<Self, PatternError> {
        let compiled = config.compile_overrides()?;
        Ok(Self { config, compiled })
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Resolve the effective options for `path`.
    pub fn resolve(&self, path: &Path) -> ResolvedOptions {
        let mut options = FormatterOptions::default();
        let mut origins: BTreeMap<String, OptionOrigin> = OPTION_KEYS
            .iter()
            .map(|key| (key.to_string(), OptionOrigin::Default))
            .collect();

        options.apply(&self.config.base);
        for key in self.config.base.specified_keys() {
            origins.insert(key.to_string(), OptionOrigin::Base);
        }

        let mut matched = Vec::new();
        for index in self.compiled.matching_indices(path) {
            let rule = &self.config.overrides[index];
            options.apply(&rule.options);

            let keys = rule.options.specified_keys();
            for key in &keys {
                origins.insert(
                    key.to_string(),
                    OptionOrigin::Override {
                        index,
                        pattern: rule.files.display(),
                    },
                );
            }

            matched.push(MatchedRule {
                index,
                patterns: rule.files.patterns().to_vec(),
                keys: keys.into_iter().map(String::from).collect(),
            });
        }

        ResolvedOptions {
            options,
            matched,
            origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OptionsPatch, TrailingComma};
    use crate::overrides::{FilePatterns, OverrideRule};

    fn resolver(config: FormatterConfig) -> Resolver {
        Resolver::new(config).unwrap()
    }

    #[test]
    fn test_resolve_without_matches_uses_base() {
        let resolver = resolver(FormatterConfig::recommended());

        let resolved = resolver.resolve(Path::new("src/index.ts"));

        assert_eq!(resolved.options.print_width, 100);
        assert_eq!(resolved.options.tab_width, 4);
        assert!(resolved.matched.is_empty());
        assert_eq!(resolved.origins["print_width"], OptionOrigin::Base);
        // semi was never specified anywhere
        assert_eq!(resolved.origins["semi"], OptionOrigin::Default);
    }

    #[test]
    fn test_component_file_layers_both_matching_rules() {
        let resolver = resolver(FormatterConfig::recommended());

        let resolved = resolver.resolve(Path::new("src/components/Button.vue"));

        // The component extension appears in the first rule and in the
        // HTML-parser rule's pattern list; both fire, in listed order
        assert_eq!(resolved.matched.len(), 2);
        assert_eq!(resolved.matched[0].index, 0);
        assert_eq!(resolved.matched[1].index, 3);

        // Width, indent, and commas come from the first rule
        assert_eq!(resolved.options.print_width, 160);
        assert_eq!(resolved.options.tab_width, 2);
        assert_eq!(resolved.options.trailing_comma, TrailingComma::None);
        // The later rule only contributes the parser
        assert_eq!(resolved.options.parser.as_deref(), Some("html"));
        // Keys no rule touched come from the base
        assert!(resolved.options.single_quote);

        assert_eq!(
            resolved.origins["print_width"],
            OptionOrigin::Override {
                index: 0,
                pattern: "*.vue".to_string()
            }
        );
        assert_eq!(
            resolved.origins["parser"],
            OptionOrigin::Override {
                index: 3,
                pattern: "*.njk, *.twig, *.vue".to_string()
            }
        );
    }

    #[test]
    fn test_last_matching_rule_wins() {
        let config = FormatterConfig {
            base: OptionsPatch {
                print_width: Some(80),
                ..Default::default()
            },
            overrides: vec![
                OverrideRule {
                    files: FilePatterns::One("*.html".to_string()),
                    options: OptionsPatch {
                        print_width: Some(100),
                        tab_width: Some(2),
                        ..Default::default()
                    },
                },
                OverrideRule {
                    files: FilePatterns::One("**/templates/**/*.html".to_string()),
                    options: OptionsPatch {
                        print_width: Some(120),
                        parser: Some("jinja-template".to_string()),
                        ..Default::default()
                    },
                },
            ],
        };
        let resolver = resolver(config);

        let resolved = resolver.resolve(Path::new("app/templates/base.html"));

        // Both rules matched; the later one wins for print_width
        assert_eq!(resolved.matched.len(), 2);
        assert_eq!(resolved.options.print_width, 120);
        // tab_width came only from the earlier rule and survives
        assert_eq!(resolved.options.tab_width, 2);
        assert_eq!(resolved.options.parser.as_deref(), Some("jinja-template"));

        assert_eq!(
            resolved.origins["print_width"],
            OptionOrigin::Override {
                index: 1,
                pattern: "**/templates/**/*.html".to_string()
            }
        );
        assert_eq!(
            resolved.origins["tab_width"],
            OptionOrigin::Override {
                index: 0,
                pattern: "*.html".to_string()
            }
        );
    }

    #[test]
    fn test_override_beats_base_for_specified_keys_only() {
        let resolver = resolver(FormatterConfig::recommended());

        let resolved = resolver.resolve(Path::new("styles/app.scss"));

        assert!(!resolved.options.single_quote);
        assert_eq!(
            resolved.origins["single_quote"],
            OptionOrigin::Override {
                index: 1,
                pattern: "*.scss".to_string()
            }
        );
        // Width still comes from the base
        assert_eq!(resolved.options.print_width, 100);
        assert_eq!(resolved.origins["print_width"], OptionOrigin::Base);
    }

    #[test]
    fn test_pattern_list_rule_resolution() {
        let resolver = resolver(FormatterConfig::recommended());

        let resolved = resolver.resolve(Path::new("emails/welcome.njk"));

        assert_eq!(resolved.options.parser.as_deref(), Some("html"));
        assert_eq!(resolved.matched.len(), 1);
        assert_eq!(
            resolved.matched[0].patterns,
            vec!["*.njk", "*.twig", "*.vue"]
        );
    }
}
