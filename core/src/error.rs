//! # Error Handling
//!
//! Provides the unified `AppError` enum returned by every engine entry point.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Every failure is local to a single call and deterministic: retrying the same
/// input yields the same error.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A required top-level key is missing (or has the wrong shape) in an input document.
    #[from(ignore)]
    #[display("Input Shape Error: document '{document}' has no usable '{key}'")]
    InputShape {
        /// Label of the offending document (usually its file name).
        document: String,
        /// The key that is missing or malformed.
        key: String,
    },

    /// Two distinct schema names canonicalize to the same component key.
    #[from(ignore)]
    #[display("Schema Conflict Error: '{first}' and '{second}' both canonicalize to '{canonical}'")]
    SchemaConflict {
        /// The original name that claimed the canonical key first.
        first: String,
        /// The original name that collided with it.
        second: String,
        /// The shared canonical key.
        canonical: String,
    },

    /// A `#/components/schemas/<Name>` reference has no matching component.
    #[from(ignore)]
    #[display("Dangling Reference Error: '{reference}' at '{pointer}' does not resolve")]
    DanglingReference {
        /// The reference string as found in the document.
        reference: String,
        /// JSON Pointer to the value holding the reference.
        pointer: String,
    },

    /// Raw input could not be parsed into a document tree.
    #[from(ignore)]
    #[display("Source Read Error: {_0}")]
    SourceRead(String),

    /// A configured path rewrite rule is not a valid regular expression.
    #[display("Invalid Path Rule: {_0}")]
    InvalidPathRule(regex::Error),

    /// A tree could not be serialized or converted.
    #[from(ignore)]
    #[display("Serialization Error: {_0}")]
    Serialization(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
