use oas_merge_core::{
    canonical_schema_name, collect_schema_references, merge_documents, merge_normalized,
    normalize_document, overlay_schema, validate_references, ArrayPolicy, Document,
    EndpointDescriptor, MergeOptions, PathNormalizer,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::{subsequence, Index};
use serde_json::{json, Map, Value};

const PATH_POOL: [&str; 7] = [
    "/v2/health/live",
    "/v2/health/ready",
    "/v2/models/${MODEL_NAME}/ready",
    "/v2/models/${MODEL_NAME}/versions/${MODEL_VERSION}/infer",
    "/v2/repository/index",
    "/v2/",
    "${MODEL_NAME}/ready",
];

const SCHEMA_POOL: [&str; 5] = [
    "model_error",
    "inference_request",
    "InferenceResponse",
    "metadata_tensor",
    "HTTPValidationError",
];

/// Builds a document where every path references one of its own schemas.
fn build_document(
    paths: &[&str],
    schemas: &[&str],
    summaries: &[String],
    picks: &[Index],
) -> Value {
    let mut schema_map = Map::new();
    for name in schemas {
        schema_map.insert(
            name.to_string(),
            json!({ "type": "object", "tags": [name], "x-source": "generated" }),
        );
    }

    let mut path_map = Map::new();
    for (i, path) in paths.iter().enumerate() {
        let reference = format!("#/components/schemas/{}", picks[i].get(schemas));
        let summary = &summaries[i];
        path_map.insert(
            path.to_string(),
            json!({
                "get": {
                    "summary": summary,
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": reference }
                                }
                            }
                        }
                    }
                }
            }),
        );
    }

    json!({
        "openapi": "3.0.0",
        "info": { "title": "generated", "version": "1.0" },
        "tags": [ { "name": "health" } ],
        "paths": Value::Object(path_map),
        "components": { "schemas": Value::Object(schema_map) }
    })
}

fn document_strategy() -> impl Strategy<Value = Value> {
    (
        subsequence(PATH_POOL.to_vec(), 0..=PATH_POOL.len()),
        subsequence(SCHEMA_POOL.to_vec(), 1..=SCHEMA_POOL.len()),
        prop::collection::vec("[A-Za-z ]{0,12}", PATH_POOL.len()),
        prop::collection::vec(any::<Index>(), PATH_POOL.len()),
    )
        .prop_map(|(paths, schemas, summaries, picks)| {
            build_document(&paths, &schemas, &summaries, &picks)
        })
}

/// Two documents over disjoint path sets.
fn disjoint_pair_strategy() -> impl Strategy<Value = (Value, Value)> {
    (
        subsequence(PATH_POOL.to_vec(), 0..=PATH_POOL.len()),
        prop::collection::vec(any::<bool>(), PATH_POOL.len()),
        subsequence(SCHEMA_POOL.to_vec(), 1..=SCHEMA_POOL.len()),
        subsequence(SCHEMA_POOL.to_vec(), 1..=SCHEMA_POOL.len()),
        prop::collection::vec("[A-Za-z ]{0,12}", PATH_POOL.len()),
        prop::collection::vec(any::<Index>(), PATH_POOL.len()),
    )
        .prop_map(|(paths, sides, left_schemas, right_schemas, summaries, picks)| {
            let (left, right): (Vec<(usize, &str)>, Vec<(usize, &str)>) = paths
                .iter()
                .copied()
                .enumerate()
                .partition(|(i, _)| sides[*i]);
            let left_paths: Vec<&str> = left.iter().map(|(_, p)| *p).collect();
            let right_paths: Vec<&str> = right.iter().map(|(_, p)| *p).collect();
            (
                build_document(&left_paths, &left_schemas, &summaries, &picks),
                build_document(&right_paths, &right_schemas, &summaries, &picks),
            )
        })
}

fn normalized(value: Value) -> Document {
    let doc = Document::from_value("generated", value).unwrap();
    normalize_document(doc, &PathNormalizer::default()).unwrap()
}

proptest! {
    #[test]
    fn merge_with_itself_is_idempotent(value in document_strategy()) {
        let doc = normalized(value);
        let merged = merge_documents(doc.clone(), doc.clone(), ArrayPolicy::Union);
        prop_assert_eq!(merged, doc);
    }

    #[test]
    fn disjoint_paths_union(pair in disjoint_pair_strategy()) {
        let (a, b) = pair;
        let (a, b) = (normalized(a), normalized(b));
        let mut expected: Vec<String> = a.paths().keys().cloned().collect();
        expected.extend(b.paths().keys().cloned());

        let merged = merge_documents(a, b, ArrayPolicy::Union);
        let keys: Vec<String> = merged.paths().keys().cloned().collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn right_document_takes_precedence(a in document_strategy(), b in document_strategy()) {
        let (a, b) = (normalized(a), normalized(b));
        let merged = merge_documents(a.clone(), b.clone(), ArrayPolicy::Union);
        for (path, item) in b.paths() {
            prop_assert_eq!(&merged.paths()[path], item);
        }
        for (path, item) in a.paths() {
            if !b.paths().contains_key(path) {
                prop_assert_eq!(&merged.paths()[path], item);
            }
        }
    }

    #[test]
    fn references_resolve_after_merge(
        a in document_strategy(),
        b in document_strategy(),
        concatenate in any::<bool>(),
    ) {
        let arrays = if concatenate {
            ArrayPolicy::Concatenate
        } else {
            ArrayPolicy::Union
        };
        let merged = merge_documents(normalized(a), normalized(b), arrays);
        prop_assert!(validate_references(&merged).is_ok());
        let schemas = merged.schemas();
        for found in collect_schema_references(&merged.as_value()) {
            prop_assert!(schemas.contains_key(&found.name));
        }
    }

    #[test]
    fn merge_normalized_references_resolve(a in document_strategy(), b in document_strategy()) {
        let left = Document::from_value("left", a).unwrap();
        let right = Document::from_value("right", b).unwrap();
        prop_assert!(merge_normalized(left, right, &MergeOptions::default()).is_ok());
    }

    #[test]
    fn canonical_names_match_titles(value in document_strategy()) {
        let doc = normalized(value);
        for (key, schema) in doc.schemas() {
            prop_assert_eq!(&canonical_schema_name(key), key);
            prop_assert_eq!(&schema["title"], &json!(key));
        }
    }

    #[test]
    fn overlay_without_descriptors_is_noop(value in document_strategy()) {
        let none: Vec<EndpointDescriptor> = Vec::new();
        prop_assert_eq!(overlay_schema(value.clone(), none), value);
    }
}

#[test]
fn canonicalization_ignores_underscore_casing() {
    assert_eq!(
        canonical_schema_name("model_error"),
        canonical_schema_name("Model_Error")
    );
}
