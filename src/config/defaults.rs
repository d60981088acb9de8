//! Built-in recommended configuration (layer 1)
//!
//! Reproduces the config shipped with the tool: the base options plus the
//! stock override rules for component markup, stylesheets, and templated
//! HTML variants.

use crate::options::{OptionsPatch, TrailingComma};
use crate::overrides::{FilePatterns, OverrideRule};

use super::FormatterConfig;

impl FormatterConfig {
    /// The shipped recommended configuration. This is the built-in layer
    /// every project config merges over.
    pub fn recommended() -> Self {
        Self {
            base: OptionsPatch {
                print_width: Some(100),
                tab_width: Some(4),
                single_quote: Some(true),
                trailing_comma: Some(TrailingComma::Es5),
                ..Default::default()
            },
            overrides: vec![
                // Single-file components: wide lines, 2-space indent, no
                // trailing commas
                OverrideRule {
                    files: FilePatterns::One("*.vue".to_string()),
                    options: OptionsPatch {
                        print_width: Some(160),
                        tab_width: Some(2),
                        trailing_comma: Some(TrailingComma::None),
                        ..Default::default()
                    },
                },
                // Stylesheets prefer double quotes
                OverrideRule {
                    files: FilePatterns::One("*.scss".to_string()),
                    options: OptionsPatch {
                        single_quote: Some(false),
                        ..Default::default()
                    },
                },
                // Framework template HTML needs the template-aware parser
                OverrideRule {
                    files: FilePatterns::One("**/templates/**/*.html".to_string()),
                    options: OptionsPatch {
                        print_width: Some(160),
                        tab_width: Some(2),
                        parser: Some("jinja-template".to_string()),
                        ..Default::default()
                    },
                },
                // Templating markup formats, components included, are close
                // enough to HTML. Listed last so component files keep the
                // widths from the first rule and pick up only the parser.
                OverrideRule {
                    files: FilePatterns::Many(vec![
                        "*.njk".to_string(),
                        "*.twig".to_string(),
                        "*.vue".to_string(),
                    ]),
                    options: OptionsPatch {
                        parser: Some("html".to_string()),
                        ..Default::default()
                    },
                },
            ],
        }
    }
}
