#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! A thin owner of a parsed document tree that guarantees the shape the merge
//! engine relies on: a `paths` mapping and a `components.schemas` mapping.

use crate::error::{AppError, AppResult};
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level key holding path items.
pub const PATHS: &str = "paths";
/// Top-level key holding reusable components.
pub const COMPONENTS: &str = "components";
/// Section of `components` holding schema components.
pub const SCHEMAS: &str = "schemas";

/// Textual formats a document can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// YAML (also accepts JSON input).
    #[default]
    Yaml,
    /// JSON.
    Json,
}

impl SourceFormat {
    /// Picks a format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

/// A parsed API description with guaranteed `paths` and `components.schemas`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Parses `text` in the given format.
    pub fn parse(label: &str, text: &str, format: SourceFormat) -> AppResult<Self> {
        Self::from_value(label, parse_tree(label, text, format)?)
    }

    /// Parses a YAML document.
    pub fn from_yaml(label: &str, text: &str) -> AppResult<Self> {
        Self::parse(label, text, SourceFormat::Yaml)
    }

    /// Parses a JSON document.
    pub fn from_json(label: &str, text: &str) -> AppResult<Self> {
        Self::parse(label, text, SourceFormat::Json)
    }

    /// Validates the shape of an already parsed tree.
    ///
    /// `paths` must be present; `null` counts as empty. A missing or `null`
    /// `components` / `components.schemas` is materialized as an empty mapping.
    pub fn from_value(label: &str, value: Value) -> AppResult<Self> {
        let shape_error = |key: &str| AppError::InputShape {
            document: label.to_string(),
            key: key.to_string(),
        };

        let Value::Object(mut root) = value else {
            return Err(shape_error(PATHS));
        };

        match root.get(PATHS) {
            Some(Value::Object(_)) => {}
            Some(Value::Null) => {
                root.insert(PATHS.to_string(), Value::Object(Map::new()));
            }
            _ => return Err(shape_error(PATHS)),
        }

        let components = root
            .entry(COMPONENTS)
            .or_insert_with(|| Value::Object(Map::new()));
        if components.is_null() {
            *components = Value::Object(Map::new());
        }
        let Value::Object(components) = components else {
            return Err(shape_error(COMPONENTS));
        };

        let schemas = components
            .entry(SCHEMAS)
            .or_insert_with(|| Value::Object(Map::new()));
        if schemas.is_null() {
            *schemas = Value::Object(Map::new());
        }
        if !schemas.is_object() {
            return Err(shape_error("components.schemas"));
        }

        Ok(Self { root })
    }

    /// Wraps a map produced by merging two valid documents.
    pub(crate) fn from_normalized_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// The `paths` mapping.
    pub fn paths(&self) -> &Map<String, Value> {
        self.root
            .get(PATHS)
            .and_then(Value::as_object)
            .unwrap_or_else(|| empty_map())
    }

    /// The `components.schemas` mapping.
    pub fn schemas(&self) -> &Map<String, Value> {
        self.root
            .get(COMPONENTS)
            .and_then(|c| c.get(SCHEMAS))
            .and_then(Value::as_object)
            .unwrap_or_else(|| empty_map())
    }

    /// Takes `paths` out of the document, leaving an empty mapping behind.
    pub(crate) fn take_paths(&mut self) -> Map<String, Value> {
        take_map(self.root.get_mut(PATHS))
    }

    /// Takes `components.schemas` out of the document, leaving an empty mapping behind.
    pub(crate) fn take_schemas(&mut self) -> Map<String, Value> {
        take_map(
            self.root
                .get_mut(COMPONENTS)
                .and_then(|c| c.get_mut(SCHEMAS)),
        )
    }

    /// Puts a `paths` mapping back in place.
    pub(crate) fn set_paths(&mut self, paths: Map<String, Value>) {
        if let Some(slot) = self.root.get_mut(PATHS) {
            *slot = Value::Object(paths);
        }
    }

    /// Puts a `components.schemas` mapping back in place.
    pub(crate) fn set_schemas(&mut self, schemas: Map<String, Value>) {
        if let Some(slot) = self
            .root
            .get_mut(COMPONENTS)
            .and_then(|c| c.get_mut(SCHEMAS))
        {
            *slot = Value::Object(schemas);
        }
    }

    /// Returns a copy of the document as a JSON value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Borrows the root mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Consumes the document, returning the root mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.root
    }

    /// Consumes the document, returning the tree.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serializes to YAML, preserving key order.
    pub fn to_yaml_string(&self) -> AppResult<String> {
        serde_yaml::to_string(&self.root)
            .map_err(|e| AppError::Serialization(format!("Failed to write YAML: {}", e)))
    }

    /// Serializes to pretty-printed JSON, preserving key order.
    pub fn to_json_string_pretty(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| AppError::Serialization(format!("Failed to write JSON: {}", e)))
    }

    /// Serializes in the given format.
    pub fn to_string_in(&self, format: SourceFormat) -> AppResult<String> {
        match format {
            SourceFormat::Yaml => self.to_yaml_string(),
            SourceFormat::Json => self.to_json_string_pretty(),
        }
    }
}

/// Parses `text` into a bare tree without any shape checks.
///
/// Used for schemas generated elsewhere, which need not carry `paths`.
pub fn parse_tree(label: &str, text: &str, format: SourceFormat) -> AppResult<Value> {
    match format {
        SourceFormat::Yaml => {
            // Going through serde_yaml::Value turns unquoted `200:` keys into strings.
            let raw: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| {
                AppError::SourceRead(format!("Failed to parse YAML '{}': {}", label, e))
            })?;
            serde_json::to_value(raw).map_err(|e| {
                AppError::SourceRead(format!("Unsupported YAML structure in '{}': {}", label, e))
            })
        }
        SourceFormat::Json => serde_json::from_str(text).map_err(|e| {
            AppError::SourceRead(format!("Failed to parse JSON '{}': {}", label, e))
        }),
    }
}

fn take_map(slot: Option<&mut Value>) -> Map<String, Value> {
    match slot {
        Some(Value::Object(map)) => std::mem::take(map),
        _ => Map::new(),
    }
}

fn empty_map() -> &'static Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    EMPTY.get_or_init(Map::new)
}
