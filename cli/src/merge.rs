#![deny(missing_docs)]

//! # Merge Command
//!
//! Reads two documents, normalizes and merges them, and writes the result.

use crate::error::CliResult;
use crate::io::{read_document, write_output};
use crate::options::{Format, OptionArgs};
use oas_merge_core::merge_normalized;
use std::path::PathBuf;

/// Arguments for the merge command.
#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// The base document.
    #[clap(long, env = "OAS_MERGE_LEFT")]
    pub left: PathBuf,

    /// The document whose entries win on conflict.
    #[clap(long, env = "OAS_MERGE_RIGHT")]
    pub right: PathBuf,

    /// Where to write the merged document (stdout when omitted).
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the output extension, else YAML).
    #[clap(long, value_enum)]
    pub format: Option<Format>,

    /// Merge options.
    #[clap(flatten)]
    pub options: OptionArgs,
}

/// Executes the merge.
pub fn execute(args: &MergeArgs) -> CliResult<()> {
    let options = args.options.load()?;
    let left = read_document(&args.left)?;
    let right = read_document(&args.right)?;

    tracing::info!(left = %args.left.display(), right = %args.right.display(), "merging documents");
    let merged = merge_normalized(left, right, &options)?;

    let format = Format::resolve(args.format, args.output.as_deref());
    write_output(args.output.as_deref(), &merged.to_string_in(format)?)
}
