//! # Merge Configuration
//!
//! Options injected by the caller. The engine never reads files or environment
//! variables itself; the CLI (or any embedding server) deserializes these from
//! wherever it keeps its settings.

use serde::Deserialize;

/// How the document-level merge combines two arrays found at the same location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayPolicy {
    /// Left elements followed by all right elements.
    Concatenate,
    /// Left elements followed by the right elements not already present on the left.
    #[default]
    Union,
}

/// An extra textual substitution applied to path templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathRule {
    /// Regular expression matched against the path template.
    pub pattern: String,
    /// Literal replacement text (no capture-group expansion).
    pub replacement: String,
}

/// Options for a merge invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Array policy used by `merge_documents`.
    pub array_policy: ArrayPolicy,
    /// Run the dangling reference check on the merged document.
    pub validate_references: bool,
    /// Extra path rules, applied between the placeholder rules and the trailing `/v2/` rule.
    pub path_rules: Vec<PathRule>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            array_policy: ArrayPolicy::default(),
            validate_references: true,
            path_rules: Vec::new(),
        }
    }
}
