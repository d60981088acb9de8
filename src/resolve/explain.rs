//! Explain output for option resolution
//!
//! Structured JSON and human-readable explanations of which override rules
//! fired for a path and where each effective value came from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::options::TrailingComma;

use super::{MatchedRule, OptionOrigin, ResolvedOptions};

/// Explanation of one path's resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    /// The path that was resolved
    pub path: String,

    /// Override rules that matched, in listed order
    pub matched_rules: Vec<MatchedRule>,

    /// The complete effective option set
    pub options: crate::options::FormatterOptions,

    /// Per-key origin of the final value
    pub origins: BTreeMap<String, OptionOrigin>,

    /// Human-readable explanation
    pub explanation: String,
}

impl ExplainOutput {
    /// Build an explanation from a resolution result.
    pub fn from_resolved(path: &Path, resolved: &ResolvedOptions) -> Self {
        let path = path.to_string_lossy().to_string();
        let explanation = Self::generate_explanation(&path, resolved);

        Self {
            path,
            matched_rules: resolved.matched.clone(),
            options: resolved.options.clone(),
            origins: resolved.origins.clone(),
            explanation,
        }
    }

    fn generate_explanation(path: &str, resolved: &ResolvedOptions) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Path: {}", path));
        lines.push(String::new());

        if resolved.matched.is_empty() {
            lines.push("No override rules matched; base configuration applies.".to_string());
        } else {
            lines.push("Matched overrides (in order):".to_string());
            for rule in &resolved.matched {
                lines.push(format!(
                    "  [{}] {} -> {}",
                    rule.index,
                    rule.patterns.join(", "),
                    rule.keys.join(", ")
                ));
            }
        }

        lines.join("\n")
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut output = self.explanation.clone();

        output.push_str("\n\n--- Effective Options ---\n");
        let options = &self.options;
        output.push_str(&format!(
            "print_width: {}{}\n",
            options.print_width,
            self.origin_note("print_width")
        ));
        output.push_str(&format!(
            "tab_width: {}{}\n",
            options.tab_width,
            self.origin_note("tab_width")
        ));
        output.push_str(&format!(
            "use_tabs: {}{}\n",
            options.use_tabs,
            self.origin_note("use_tabs")
        ));
        output.push_str(&format!(
            "semi: {}{}\n",
            options.semi,
            self.origin_note("semi")
        ));
        output.push_str(&format!(
            "single_quote: {}{}\n",
            options.single_quote,
            self.origin_note("single_quote")
        ));
        let comma = match options.trailing_comma {
            TrailingComma::None => "none",
            TrailingComma::Es5 => "es5",
            TrailingComma::All => "all",
        };
        output.push_str(&format!(
            "trailing_comma: {}{}\n",
            comma,
            self.origin_note("trailing_comma")
        ));
        output.push_str(&format!(
            "parser: {}{}\n",
            options.parser.as_deref().unwrap_or("(inferred)"),
            self.origin_note("parser")
        ));

        output
    }

    fn origin_note(&self, key: &str) -> String {
        match self.origins.get(key) {
            Some(OptionOrigin::Default) | None => "  (default)".to_string(),
            Some(OptionOrigin::Base) => "  (base)".to_string(),
            Some(OptionOrigin::Override { index, pattern }) => {
                format!("  (override {}: {})", index, pattern)
            }
        }
    }
}
