#![deny(missing_docs)]

//! # Document Merging
//!
//! Generic deep merge over JSON trees plus the OpenAPI policy layered on top.
//!
//! Conflict policy of the generic merge:
//!
//! | left \ right     | object        | array         | scalar       |
//! |------------------|---------------|---------------|--------------|
//! | object           | key union     | concatenate   | right wins   |
//! | array            | concatenate   | concatenate   | concatenate  |
//! | scalar           | right wins    | concatenate   | right wins   |
//!
//! "Concatenate" wraps a non-array side into a single element list. Leaf
//! conflicts are last-write-wins.

use crate::config::{ArrayPolicy, MergeOptions};
use crate::error::AppResult;
use crate::oas::document::{Document, COMPONENTS, PATHS, SCHEMAS};
use crate::oas::normalization::normalize_document;
use crate::oas::paths::PathNormalizer;
use crate::oas::validation::validate_references;
use serde_json::{Map, Value};

/// Recursive merger over JSON trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeepMerger {
    arrays: ArrayPolicy,
}

impl DeepMerger {
    /// Creates a merger using `arrays` for array/array combinations.
    pub fn new(arrays: ArrayPolicy) -> Self {
        Self { arrays }
    }

    /// Merges `right` into `left` and returns the result.
    pub fn merge(&self, left: Value, right: Value) -> Value {
        match (left, right) {
            (Value::Object(l), Value::Object(r)) => {
                Value::Object(merge_maps(l, r, |_, a, b| self.merge(a, b)))
            }
            (Value::Array(l), Value::Array(r)) => Value::Array(self.join(l, r)),
            (Value::Array(l), r) => Value::Array(self.join(l, vec![r])),
            (l, Value::Array(r)) => Value::Array(self.join(vec![l], r)),
            (_, r) => r,
        }
    }

    fn join(&self, mut left: Vec<Value>, right: Vec<Value>) -> Vec<Value> {
        match self.arrays {
            ArrayPolicy::Concatenate => left.extend(right),
            ArrayPolicy::Union => {
                for item in right {
                    if !left.contains(&item) {
                        left.push(item);
                    }
                }
            }
        }
        left
    }
}

/// Generic deep merge with plain array concatenation.
pub fn deep_merge(left: Value, right: Value) -> Value {
    DeepMerger::new(ArrayPolicy::Concatenate).merge(left, right)
}

/// Unions two mappings. Keys present on both sides are combined with `resolve`
/// in the left key's position; right-only keys are appended in right order.
fn merge_maps<F>(
    mut left: Map<String, Value>,
    right: Map<String, Value>,
    resolve: F,
) -> Map<String, Value>
where
    F: Fn(&str, Value, Value) -> Value,
{
    for (key, right_value) in right {
        match left.get_mut(&key) {
            Some(slot) => {
                let left_value = slot.take();
                *slot = resolve(&key, left_value, right_value);
            }
            None => {
                left.insert(key, right_value);
            }
        }
    }
    left
}

/// Collections whose colliding entries are replaced wholesale by the right side.
fn overwrite_entries(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => Value::Object(merge_maps(l, r, |_, _, b| b)),
        (_, r) => r,
    }
}

/// Merges two already normalized documents.
///
/// Top-level keys follow the generic merge, except that entries of `paths` and
/// `components.schemas` that exist on both sides are replaced by the right
/// document's entry as a whole.
pub fn merge_documents(left: Document, right: Document, arrays: ArrayPolicy) -> Document {
    let merger = DeepMerger::new(arrays);
    let merged = merge_maps(left.into_map(), right.into_map(), |key, l, r| match key {
        PATHS => overwrite_entries(l, r),
        COMPONENTS => match (l, r) {
            (Value::Object(lc), Value::Object(rc)) => {
                Value::Object(merge_maps(lc, rc, |section, a, b| match section {
                    SCHEMAS => overwrite_entries(a, b),
                    _ => merger.merge(a, b),
                }))
            }
            (l, r) => merger.merge(l, r),
        },
        _ => merger.merge(l, r),
    });
    Document::from_normalized_map(merged)
}

/// Normalizes both documents, merges them and validates the result.
pub fn merge_normalized(
    left: Document,
    right: Document,
    options: &MergeOptions,
) -> AppResult<Document> {
    let normalizer = PathNormalizer::with_rules(&options.path_rules)?;
    let left = normalize_document(left, &normalizer)?;
    let right = normalize_document(right, &normalizer)?;

    let merged = merge_documents(left, right, options.array_policy);
    tracing::debug!(
        paths = merged.paths().len(),
        schemas = merged.schemas().len(),
        "merged documents"
    );

    if options.validate_references {
        validate_references(&merged)?;
    }
    Ok(merged)
}
