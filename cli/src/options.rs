#![deny(missing_docs)]

//! # Options
//!
//! Shared argument types and loading of `MergeOptions` from a config file.

use crate::error::CliResult;
use oas_merge_core::{ArrayPolicy, MergeOptions, PathNormalizer, SourceFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// Output format selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML output.
    Yaml,
    /// Pretty-printed JSON output.
    Json,
}

impl Format {
    /// Uses the explicit format, else the output extension, else YAML.
    pub fn resolve(explicit: Option<Format>, output: Option<&Path>) -> SourceFormat {
        match (explicit, output) {
            (Some(Format::Yaml), _) => SourceFormat::Yaml,
            (Some(Format::Json), _) => SourceFormat::Json,
            (None, Some(path)) => SourceFormat::from_path(path),
            (None, None) => SourceFormat::Yaml,
        }
    }
}

/// Array policy selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayPolicyArg {
    /// Keep every element from both sides.
    Concatenate,
    /// Skip right-hand elements already present on the left.
    Union,
}

impl From<ArrayPolicyArg> for ArrayPolicy {
    fn from(arg: ArrayPolicyArg) -> Self {
        match arg {
            ArrayPolicyArg::Concatenate => ArrayPolicy::Concatenate,
            ArrayPolicyArg::Union => ArrayPolicy::Union,
        }
    }
}

/// The merge options file, shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML file with merge options (`array_policy`, `validate_references`, `path_rules`).
    #[clap(long, env = "OAS_MERGE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Loads the config file, or the defaults when none is given.
    pub fn load(&self) -> CliResult<MergeOptions> {
        let Some(path) = &self.config else {
            return Ok(MergeOptions::default());
        };
        let text = fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(MergeOptions::default());
        }
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Builds the path normalizer from the configured `path_rules`.
    pub fn normalizer(&self) -> CliResult<PathNormalizer> {
        let options = self.load()?;
        Ok(PathNormalizer::with_rules(&options.path_rules)?)
    }
}

/// Config file and override flags shared by commands that merge.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Merge options file.
    #[clap(flatten)]
    pub file: ConfigArgs,

    /// Skip the dangling reference check.
    #[clap(long)]
    pub no_validate: bool,

    /// Override the array policy from the config file.
    #[clap(long, value_enum)]
    pub array_policy: Option<ArrayPolicyArg>,
}

impl OptionArgs {
    /// Loads the config file (if any) and applies the flag overrides.
    pub fn load(&self) -> CliResult<MergeOptions> {
        let mut options = self.file.load()?;
        if self.no_validate {
            options.validate_references = false;
        }
        if let Some(policy) = self.array_policy {
            options.array_policy = policy.into();
        }
        tracing::debug!(?options, "resolved merge options");
        Ok(options)
    }
}
