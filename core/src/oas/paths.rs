#![deny(missing_docs)]

//! # Path Normalization
//!
//! Rewrites path templates written against the published protocol documents
//! (`${MODEL_NAME}` placeholders, a trailing `/v2/`) into the templates served
//! by the REST layer (`{model_name}`, `/v2`).

use crate::config::PathRule;
use crate::error::AppResult;
use regex::{NoExpand, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

const MODEL_NAME_PATTERN: &str = r"\$\{MODEL_NAME\}";
const MODEL_VERSION_PATTERN: &str = r"\$\{MODEL_VERSION\}";
const TRAILING_V2_PATTERN: &str = r"/v2/$";

/// A compiled, ordered list of path substitutions.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    rules: Vec<(Regex, String)>,
}

impl Default for PathNormalizer {
    fn default() -> Self {
        default_normalizer().clone()
    }
}

impl PathNormalizer {
    /// Builds a normalizer with the built-in rules plus `extra` rules.
    ///
    /// Extra rules run after the placeholder rewrites and before the trailing
    /// `/v2/` rule, which must stay last because it is anchored on the end of
    /// the string.
    pub fn with_rules(extra: &[PathRule]) -> AppResult<Self> {
        let mut rules = Vec::with_capacity(extra.len() + 3);
        rules.push((Regex::new(MODEL_NAME_PATTERN)?, "{model_name}".to_string()));
        rules.push((
            Regex::new(MODEL_VERSION_PATTERN)?,
            "{model_version}".to_string(),
        ));
        for rule in extra {
            rules.push((Regex::new(&rule.pattern)?, rule.replacement.clone()));
        }
        rules.push((Regex::new(TRAILING_V2_PATTERN)?, "/v2".to_string()));
        Ok(Self { rules })
    }

    /// Applies every rule, in order, to `path`.
    pub fn normalize(&self, path: &str) -> String {
        self.rules
            .iter()
            .fold(path.to_string(), |acc, (regex, replacement)| {
                regex
                    .replace_all(&acc, NoExpand(replacement.as_str()))
                    .into_owned()
            })
    }

    /// Returns a new `paths` mapping with every key normalized.
    ///
    /// Iteration order is preserved. When two raw keys normalize to the same
    /// template, the later entry replaces the earlier one in place.
    pub fn normalize_keys(&self, paths: Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::with_capacity(paths.len());
        for (raw, item) in paths {
            let normalized = self.normalize(&raw);
            if out.contains_key(&normalized) {
                tracing::warn!(
                    path = %raw,
                    normalized = %normalized,
                    "duplicate path template after normalization, keeping the later one"
                );
            }
            out.insert(normalized, item);
        }
        out
    }
}

pub(crate) fn default_normalizer() -> &'static PathNormalizer {
    static DEFAULT: OnceLock<PathNormalizer> = OnceLock::new();
    DEFAULT.get_or_init(|| PathNormalizer::with_rules(&[]).expect("Invalid regex"))
}

/// Normalizes a single path template with the built-in rules.
pub fn normalize_path(path: &str) -> String {
    default_normalizer().normalize(path)
}
