#![deny(missing_docs)]

//! # OAS Merge Core
//!
//! Merges independently authored OpenAPI documents into one canonical document
//! and overlays their human-authored metadata onto generated schemas.
//!
//! ```
//! use oas_merge_core::{merge_normalized, Document, MergeOptions};
//!
//! let left = Document::from_yaml(
//!     "dataplane.yaml",
//!     "paths:\n  /v2/health/live:\n    get:\n      summary: Alive\n",
//! )?;
//! let right = Document::from_yaml(
//!     "model_repository.yaml",
//!     "paths:\n  /v2/health/live:\n    get:\n      summary: Server is live\n",
//! )?;
//!
//! let merged = merge_normalized(left, right, &MergeOptions::default())?;
//! assert_eq!(merged.paths()["/v2/health/live"]["get"]["summary"], "Server is live");
//! # Ok::<(), oas_merge_core::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// Caller-supplied merge options.
pub mod config;

/// OpenAPI document normalization, merging and overlay.
pub mod oas;

pub use config::{ArrayPolicy, MergeOptions, PathRule};
pub use error::{AppError, AppResult};
pub use oas::{
    canonical_schema_name, canonicalize_schemas, collect_schema_references, dangling_references,
    deep_merge, extract_endpoints, extract_endpoints_with, merge_documents, merge_normalized,
    normalize_document, normalize_path, overlay_openapi, overlay_schema, parse_tree,
    rewrite_references, split_schema_ref, validate_references, DeepMerger, Document,
    EndpointDescriptor, Endpoints, EnrichedSchemaCache, FoundReference, HttpMethod,
    PathNormalizer, RenameTable, SourceFormat,
};
