#![deny(missing_docs)]

//! # oas-merge CLI
//!
//! Command Line Interface for merging and normalizing OpenAPI documents.
//!
//! Supported Commands:
//! - `merge`: Normalize two documents and merge them, right side winning.
//! - `endpoints`: List the endpoint descriptors of a document.
//! - `overlay`: Copy descriptor metadata onto a generated schema.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod endpoints;
mod error;
mod io;
mod merge;
mod options;
mod overlay;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI document merge and normalization")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge two documents into one normalized document.
    Merge(merge::MergeArgs),
    /// Print the endpoint descriptors of a document as JSON.
    Endpoints(endpoints::EndpointsArgs),
    /// Apply endpoint descriptors onto a generated schema.
    Overlay(overlay::OverlayArgs),
}

/// Logs go to stderr; stdout carries document output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Merge(args) => merge::execute(args)?,
        Commands::Endpoints(args) => endpoints::execute(args)?,
        Commands::Overlay(args) => overlay::execute(args)?,
    }

    Ok(())
}
