#![deny(missing_docs)]

//! # Schema Naming
//!
//! Derives canonical component names and the rename table that maps every
//! original `components.schemas` key onto its canonical key.

use crate::error::{AppError, AppResult};
use heck::ToPascalCase;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Canonicalizes a schema component name.
///
/// The name is split on `_` and each segment is title-cased, so
/// `http_validation_error` -> `HttpValidationError` and `Model_Error` -> `ModelError`.
/// Within a segment, runs of letters and digits go through `heck`, which folds
/// acronyms too (`HTTPValidationError` -> `HttpValidationError`). Every other
/// character (`-`, `.`, `[`, ...) is kept as is. Names with no alphanumeric
/// content keep their original spelling.
pub fn canonical_schema_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    for segment in name.split('_') {
        let mut word = String::new();
        for c in segment.chars() {
            if c.is_alphanumeric() {
                word.push(c);
            } else {
                canonical.push_str(&word.to_pascal_case());
                word.clear();
                canonical.push(c);
            }
        }
        canonical.push_str(&word.to_pascal_case());
    }

    if canonical.chars().any(char::is_alphanumeric) {
        canonical
    } else {
        name.to_string()
    }
}

/// Mapping from original schema key to canonical schema key.
///
/// The table is injective: `insert` rejects a second original name that maps
/// onto a canonical key already claimed by a different original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    forward: IndexMap<String, String>,
    claimed: HashMap<String, String>,
}

impl RenameTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `original -> canonical`.
    pub fn insert(&mut self, original: &str, canonical: &str) -> AppResult<()> {
        if let Some(first) = self.claimed.get(canonical) {
            if first != original {
                return Err(AppError::SchemaConflict {
                    first: first.clone(),
                    second: original.to_string(),
                    canonical: canonical.to_string(),
                });
            }
        }
        self.claimed
            .insert(canonical.to_string(), original.to_string());
        self.forward
            .insert(original.to_string(), canonical.to_string());
        Ok(())
    }

    /// Returns the canonical name recorded for `original`.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.forward.get(original).map(String::as_str)
    }

    /// Iterates `(original, canonical)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of recorded names.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// True when no names are recorded.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// True when every name maps onto itself.
    pub fn is_identity(&self) -> bool {
        self.forward.iter().all(|(k, v)| k == v)
    }
}

/// Canonicalizes a `components.schemas` mapping.
///
/// Returns a freshly built mapping keyed by canonical names (original order
/// preserved) where every object component has `title` set to its key, plus the
/// complete rename table.
pub fn canonicalize_schemas(
    schemas: Map<String, Value>,
) -> AppResult<(Map<String, Value>, RenameTable)> {
    let mut table = RenameTable::new();
    let mut out = Map::with_capacity(schemas.len());

    for (original, mut component) in schemas {
        let canonical = canonical_schema_name(&original);
        table.insert(&original, &canonical)?;
        if let Value::Object(fields) = &mut component {
            fields.insert("title".to_string(), Value::String(canonical.clone()));
        }
        out.insert(canonical, component);
    }

    Ok((out, table))
}
