#![deny(missing_docs)]

//! # Reference Validation
//!
//! Post-merge check that every `#/components/schemas/<Name>` reference in a
//! document points at an existing schema component.

use crate::error::{AppError, AppResult};
use crate::oas::document::Document;
use crate::oas::refs::{collect_schema_references, encode_pointer_segment, FoundReference};

/// Lists every reference in `doc` that has no matching schema component.
pub fn dangling_references(doc: &Document) -> Vec<FoundReference> {
    let schemas = doc.schemas();
    let mut found = Vec::new();
    for (key, value) in doc.as_map() {
        for mut reference in collect_schema_references(value) {
            if !schemas.contains_key(&reference.name) {
                reference.pointer = format!("/{}{}", encode_pointer_segment(key), reference.pointer);
                found.push(reference);
            }
        }
    }
    found
}

/// Fails with the first dangling reference of `doc`, in document order.
pub fn validate_references(doc: &Document) -> AppResult<()> {
    let dangling = dangling_references(doc);
    if let Some(first) = dangling.first() {
        tracing::debug!(count = dangling.len(), "dangling schema references");
        return Err(AppError::DanglingReference {
            reference: first.reference.clone(),
            pointer: first.pointer.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document() {
        let doc = Document::from_value(
            "doc",
            json!({
                "paths": {
                    "/v2/health/live": {
                        "get": { "responses": { "200": { "$ref": "#/components/schemas/Live" } } }
                    }
                },
                "components": { "schemas": { "Live": { "type": "object" } } }
            }),
        )
        .unwrap();
        assert!(validate_references(&doc).is_ok());
        assert!(dangling_references(&doc).is_empty());
    }

    #[test]
    fn test_dangling_reference_location() {
        let doc = Document::from_value(
            "doc",
            json!({
                "paths": {
                    "/v2/health/live": {
                        "get": { "responses": { "200": { "$ref": "#/components/schemas/Live" } } }
                    }
                },
                "components": {
                    "schemas": {
                        "Ready": { "properties": { "live": { "$ref": "#/components/schemas/Live" } } }
                    }
                }
            }),
        )
        .unwrap();

        let dangling = dangling_references(&doc);
        assert_eq!(dangling.len(), 2);
        assert_eq!(
            dangling[1].pointer,
            "/components/schemas/Ready/properties/live/$ref"
        );

        match validate_references(&doc) {
            Err(AppError::DanglingReference { reference, pointer }) => {
                assert_eq!(reference, "#/components/schemas/Live");
                assert_eq!(pointer, "/paths/~1v2~1health~1live/get/responses/200/$ref");
            }
            other => panic!("expected DanglingReference, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_into_component() {
        let doc = Document::from_value(
            "doc",
            json!({
                "paths": {
                    "/x": { "get": { "x-code": { "$ref": "#/components/schemas/Live/properties/code" } } },
                    "/y": { "get": { "x-code": { "$ref": "#/components/schemas/Gone/properties/code" } } }
                },
                "components": { "schemas": { "Live": { "properties": { "code": {} } } } }
            }),
        )
        .unwrap();

        match validate_references(&doc) {
            Err(AppError::DanglingReference { reference, pointer }) => {
                assert_eq!(reference, "#/components/schemas/Gone/properties/code");
                assert_eq!(pointer, "/paths/~1y/get/x-code/$ref");
            }
            other => panic!("expected DanglingReference, got {:?}", other),
        }
    }
}
