#![deny(missing_docs)]

//! # File IO
//!
//! Reading inputs and writing outputs. This is the only place that touches the
//! filesystem; the engine receives parsed trees.

use crate::error::CliResult;
use oas_merge_core::{parse_tree, Document, SourceFormat};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Reads and shape-checks an API description document.
pub fn read_document(path: &Path) -> CliResult<Document> {
    let text = fs::read_to_string(path)?;
    let label = path.display().to_string();
    Ok(Document::parse(&label, &text, SourceFormat::from_path(path))?)
}

/// Reads any YAML/JSON tree, e.g. a schema generated from a route table.
pub fn read_tree(path: &Path) -> CliResult<Value> {
    let text = fs::read_to_string(path)?;
    let label = path.display().to_string();
    Ok(parse_tree(&label, &text, SourceFormat::from_path(path))?)
}

/// Writes `text` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> CliResult<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
