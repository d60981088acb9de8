//! Formatter option model
//!
//! Defines the complete option set consumed by the formatting engine, plus
//! the partial form used by config files, override rules, and CLI overrides.

use serde::{Deserialize, Serialize};

/// Option keys in declaration order, used for origin tracking.
pub const OPTION_KEYS: [&str; 7] = [
    "print_width",
    "tab_width",
    "use_tabs",
    "semi",
    "single_quote",
    "trailing_comma",
    "parser",
];

/// Trailing comma policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    /// Never print trailing commas
    None,
    /// Trailing commas where valid in ES5 (objects, arrays, etc.)
    Es5,
    /// Trailing commas wherever possible
    All,
}

impl Default for TrailingComma {
    fn default() -> Self {
        TrailingComma::Es5
    }
}

/// The complete formatter option set with every key present.
///
/// `Default` yields the built-in values a consumer sees when no config file
/// and no override rule says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterOptions {
    /// Maximum preferred line width
    pub print_width: u32,

    /// Spaces per indentation level
    pub tab_width: u32,

    /// Indent with tabs instead of spaces
    pub use_tabs: bool,

    /// Print semicolons at statement ends
    pub semi: bool,

    /// Quote style: true = single quotes, false = double quotes
    pub single_quote: bool,

    /// Trailing comma policy
    pub trailing_comma: TrailingComma,

    /// Explicit parser name; None means the consumer infers one from the
    /// file extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 4,
            use_tabs: false,
            semi: true,
            single_quote: true,
            trailing_comma: TrailingComma::default(),
            parser: None,
        }
    }
}

impl FormatterOptions {
    /// Apply a patch, replacing exactly the keys the patch specifies.
    pub fn apply(&mut self, patch: &OptionsPatch) {
        if let Some(width) = patch.print_width {
            self.print_width = width;
        }
        if let Some(width) = patch.tab_width {
            self.tab_width = width;
        }
        if let Some(tabs) = patch.use_tabs {
            self.use_tabs = tabs;
        }
        if let Some(semi) = patch.semi {
            self.semi = semi;
        }
        if let Some(single) = patch.single_quote {
            self.single_quote = single;
        }
        if let Some(comma) = patch.trailing_comma {
            self.trailing_comma = comma;
        }
        if let Some(ref parser) = patch.parser {
            self.parser = Some(parser.clone());
        }
    }
}

/// A partial option set: same keys as [`FormatterOptions`], every field
/// optional. The base section of a config file, override rule bodies, and
/// CLI overrides are all patches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_quote: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_comma: Option<TrailingComma>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
}

impl OptionsPatch {
    /// True when the patch specifies no keys at all.
    pub fn is_empty(&self) -> bool {
        self.specified_keys().is_empty()
    }

    /// Names of the keys this patch specifies, in declaration order.
    pub fn specified_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.print_width.is_some() {
            keys.push("print_width");
        }
        if self.tab_width.is_some() {
            keys.push("tab_width");
        }
        if self.use_tabs.is_some() {
            keys.push("use_tabs");
        }
        if self.semi.is_some() {
            keys.push("semi");
        }
        if self.single_quote.is_some() {
            keys.push("single_quote");
        }
        if self.trailing_comma.is_some() {
            keys.push("trailing_comma");
        }
        if self.parser.is_some() {
            keys.push("parser");
        }
        keys
    }
}
