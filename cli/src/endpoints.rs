#![deny(missing_docs)]

//! # Endpoints Command
//!
//! Prints the endpoint descriptors of a document as a JSON array.

use crate::error::CliResult;
use crate::io::{read_document, write_output};
use crate::options::ConfigArgs;
use oas_merge_core::{extract_endpoints_with, EndpointDescriptor};
use std::path::PathBuf;

/// Arguments for the endpoints command.
#[derive(clap::Args, Debug, Clone)]
pub struct EndpointsArgs {
    /// The document to describe.
    #[clap(long, short)]
    pub input: PathBuf,

    /// Where to write the descriptor list (stdout when omitted).
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Merge options file; its `path_rules` apply to the listed paths.
    #[clap(flatten)]
    pub config: ConfigArgs,
}

/// Executes the extraction.
pub fn execute(args: &EndpointsArgs) -> CliResult<()> {
    let normalizer = args.config.normalizer()?;
    let doc = read_document(&args.input)?;
    let endpoints: Vec<EndpointDescriptor> = extract_endpoints_with(&doc, &normalizer).collect();
    tracing::info!(count = endpoints.len(), input = %args.input.display(), "extracted endpoints");

    let text = serde_json::to_string_pretty(&endpoints)?;
    write_output(args.output.as_deref(), &text)
}
