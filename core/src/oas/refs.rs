#![deny(missing_docs)]

//! # Schema References
//!
//! Helpers for `#/components/schemas/<Name>` strings. Rewriting walks the tree
//! value by value and compares the whole `<Name>` segment, so renaming `Error`
//! never touches `ErrorDetail`. A reference may point inside a component
//! (`#/components/schemas/<Name>/properties/code`); only `<Name>` is renamed.

use crate::oas::naming::RenameTable;
use serde_json::Value;

/// Prefix shared by every local schema component reference.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Splits a schema reference into its component name and the pointer suffix
/// inside that component.
///
/// e.g. `#/components/schemas/User/properties/id` -> (`User`, `/properties/id`).
/// The name is unescaped (`~1` -> `/`, `~0` -> `~`). Anything else yields `None`.
pub fn split_schema_ref(value: &str) -> Option<(String, &str)> {
    let tail = value.strip_prefix(SCHEMA_REF_PREFIX)?;
    let (segment, suffix) = match tail.find('/') {
        Some(at) => tail.split_at(at),
        None => (tail, ""),
    };
    if segment.is_empty() {
        return None;
    }
    Some((decode_pointer_segment(segment), suffix))
}

/// Extracts the component name from a schema reference string.
///
/// e.g. `#/components/schemas/User` -> `User`. Anything else yields `None`.
pub fn schema_ref_name(value: &str) -> Option<String> {
    split_schema_ref(value).map(|(name, _)| name)
}

/// Builds a schema reference string for `name`.
pub fn schema_ref(name: &str) -> String {
    format!("{}{}", SCHEMA_REF_PREFIX, encode_pointer_segment(name))
}

/// Rewrites every schema reference in `value` according to `table`.
///
/// Strings that are not references, or that reference a name absent from the
/// table, are returned unchanged. Object keys are never rewritten.
pub fn rewrite_references(value: Value, table: &RenameTable) -> Value {
    if table.is_identity() {
        return value;
    }
    rewrite_node(value, table)
}

fn rewrite_node(value: Value, table: &RenameTable) -> Value {
    match value {
        Value::String(s) => {
            let renamed = split_schema_ref(&s).and_then(|(name, suffix)| {
                table
                    .get(&name)
                    .map(|canonical| format!("{}{}", schema_ref(canonical), suffix))
            });
            Value::String(renamed.unwrap_or(s))
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rewrite_node(item, table))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, rewrite_node(v, table)))
                .collect(),
        ),
        other => other,
    }
}

/// A schema reference found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReference {
    /// JSON Pointer of the value holding the reference.
    pub pointer: String,
    /// Referenced component name.
    pub name: String,
    /// The reference string as written.
    pub reference: String,
}

/// Collects every schema reference in `value`, in document order.
pub fn collect_schema_references(value: &Value) -> Vec<FoundReference> {
    let mut found = Vec::new();
    let mut pointer = String::new();
    collect_node(value, &mut pointer, &mut found);
    found
}

fn collect_node(value: &Value, pointer: &mut String, found: &mut Vec<FoundReference>) {
    match value {
        Value::String(s) => {
            if let Some(name) = schema_ref_name(s) {
                found.push(FoundReference {
                    pointer: pointer.clone(),
                    name,
                    reference: s.clone(),
                });
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&index.to_string());
                collect_node(item, pointer, found);
                pointer.truncate(len);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&encode_pointer_segment(key));
                collect_node(item, pointer, found);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}

/// Encodes a JSON Pointer segment (handles `~` and `/`).
pub(crate) fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
