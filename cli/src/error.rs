#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use oas_merge_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the merge engine.
    #[display("{}", _0)]
    Core(AppError),

    /// YAML config or output could not be (de)serialized.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// JSON descriptors or output could not be (de)serialized.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
