#![deny(missing_docs)]

//! # Schema Overlay
//!
//! Copies human-authored `summary` / `description` values onto a schema that
//! was generated from the live route table. The overlay only ever sets fields
//! a descriptor provides; it never removes anything.

use crate::error::{AppError, AppResult};
use crate::oas::document::PATHS;
use crate::oas::endpoints::EndpointDescriptor;
use serde_json::Value;
use std::borrow::Borrow;
use std::sync::OnceLock;
use utoipa::openapi::OpenApi;

/// Applies `descriptors` onto a generated schema tree.
///
/// Descriptors whose path or method is not present in `schema` are skipped:
/// they describe endpoints the server does not currently expose.
pub fn overlay_schema<I>(mut schema: Value, descriptors: I) -> Value
where
    I: IntoIterator,
    I::Item: Borrow<EndpointDescriptor>,
{
    let mut applied = 0usize;
    let mut skipped = 0usize;

    for descriptor in descriptors {
        let descriptor: &EndpointDescriptor = descriptor.borrow();
        let target = schema
            .get_mut(PATHS)
            .and_then(|paths| paths.get_mut(&descriptor.path))
            .and_then(|item| item.get_mut(descriptor.operation.as_str()))
            .and_then(Value::as_object_mut);

        let Some(operation) = target else {
            skipped += 1;
            continue;
        };

        if let Some(description) = &descriptor.description {
            operation.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        if let Some(summary) = &descriptor.summary {
            operation.insert("summary".to_string(), Value::String(summary.clone()));
        }
        applied += 1;
    }

    tracing::debug!(applied, skipped, "overlaid endpoint metadata");
    schema
}

/// Applies `descriptors` onto a schema generated with `utoipa`.
pub fn overlay_openapi<I>(openapi: OpenApi, descriptors: I) -> AppResult<OpenApi>
where
    I: IntoIterator,
    I::Item: Borrow<EndpointDescriptor>,
{
    let tree = serde_json::to_value(&openapi)
        .map_err(|e| AppError::Serialization(format!("Failed to convert OpenApi: {}", e)))?;
    let enriched = overlay_schema(tree, descriptors);
    serde_json::from_value(enriched)
        .map_err(|e| AppError::Serialization(format!("Failed to rebuild OpenApi: {}", e)))
}

/// Holds an enriched schema computed on first use.
///
/// Building the base schema and overlaying it happens once; later calls return
/// the cached tree.
#[derive(Debug, Default)]
pub struct EnrichedSchemaCache {
    cell: OnceLock<Value>,
}

impl EnrichedSchemaCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached schema, building and enriching it on first call.
    pub fn get_or_build<G>(&self, generate: G, descriptors: &[EndpointDescriptor]) -> &Value
    where
        G: FnOnce() -> Value,
    {
        self.cell
            .get_or_init(|| overlay_schema(generate(), descriptors))
    }

    /// Returns the cached schema, if it was built already.
    pub fn get(&self) -> Option<&Value> {
        self.cell.get()
    }
}
