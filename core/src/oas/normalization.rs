#![deny(missing_docs)]

//! # Document Normalization
//!
//! Brings a single document into canonical form before it is merged:
//!
//! 1. path templates are rewritten by a [`PathNormalizer`],
//! 2. `components.schemas` is rebuilt under canonical names,
//! 3. every schema reference in the tree follows the rename.

use crate::error::AppResult;
use crate::oas::document::Document;
use crate::oas::naming::canonicalize_schemas;
use crate::oas::paths::PathNormalizer;
use crate::oas::refs::rewrite_references;

/// Normalizes paths, schema names and references of `doc`.
pub fn normalize_document(mut doc: Document, normalizer: &PathNormalizer) -> AppResult<Document> {
    let paths = normalizer.normalize_keys(doc.take_paths());
    doc.set_paths(paths);

    let (schemas, renames) = canonicalize_schemas(doc.take_schemas())?;
    doc.set_schemas(schemas);

    tracing::debug!(
        paths = doc.paths().len(),
        schemas = renames.len(),
        renamed = renames.iter().filter(|(from, to)| from != to).count(),
        "normalized document"
    );

    let root = doc
        .into_map()
        .into_iter()
        .map(|(key, value)| (key, rewrite_references(value, &renames)))
        .collect();
    Ok(Document::from_normalized_map(root))
}
