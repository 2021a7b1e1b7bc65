#![deny(missing_docs)]

//! # OpenAPI Merge Engine
//!
//! - **document**: Shape-checked document trees and source parsing.
//! - **paths**: Path template normalization.
//! - **naming**: Schema name canonicalization and the rename table.
//! - **refs**: Schema reference rewriting and collection.
//! - **normalization**: The per-document normalization pipeline.
//! - **merge**: Deep merge and the OpenAPI merge policy.
//! - **validation**: Dangling reference detection.
//! - **endpoints**: Endpoint descriptor extraction.
//! - **overlay**: Applying descriptors onto generated schemas.

pub mod document;
pub mod endpoints;
pub mod merge;
pub mod naming;
pub mod normalization;
pub mod overlay;
pub mod paths;
pub mod refs;
pub mod validation;

pub use document::{parse_tree, Document, SourceFormat};
pub use endpoints::{
    extract_endpoints, extract_endpoints_with, EndpointDescriptor, Endpoints, HttpMethod,
};
pub use merge::{deep_merge, merge_documents, merge_normalized, DeepMerger};
pub use naming::{canonical_schema_name, canonicalize_schemas, RenameTable};
pub use normalization::normalize_document;
pub use overlay::{overlay_openapi, overlay_schema, EnrichedSchemaCache};
pub use paths::{normalize_path, PathNormalizer};
pub use refs::{
    collect_schema_references, rewrite_references, split_schema_ref, FoundReference,
};
pub use validation::{dangling_references, validate_references};
