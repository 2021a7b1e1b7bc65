#![deny(missing_docs)]

//! # Overlay Command
//!
//! Enriches a schema generated from a live route table with the summaries and
//! descriptions of hand-written documents.

use crate::error::CliResult;
use crate::io::{read_document, read_tree, write_output};
use crate::options::{ConfigArgs, Format};
use oas_merge_core::{extract_endpoints_with, overlay_schema, EndpointDescriptor, SourceFormat};
use std::fs;
use std::path::PathBuf;

/// Arguments for the overlay command.
#[derive(clap::Args, Debug, Clone)]
pub struct OverlayArgs {
    /// The generated schema to enrich.
    #[clap(long)]
    pub schema: PathBuf,

    /// Documents to take descriptors from. Later documents win.
    #[clap(long = "descriptors", num_args = 1..)]
    pub descriptors: Vec<PathBuf>,

    /// JSON files holding descriptor lists, as printed by `endpoints`.
    /// Applied after the documents.
    #[clap(long = "endpoints", num_args = 1..)]
    pub endpoints: Vec<PathBuf>,

    /// Where to write the enriched schema (stdout when omitted).
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the output extension, else YAML).
    #[clap(long, value_enum)]
    pub format: Option<Format>,

    /// Merge options file; its `path_rules` apply to descriptor paths.
    #[clap(flatten)]
    pub config: ConfigArgs,
}

/// Executes the overlay.
pub fn execute(args: &OverlayArgs) -> CliResult<()> {
    if args.descriptors.is_empty() && args.endpoints.is_empty() {
        tracing::warn!("no descriptor sources given; schema is written unchanged");
    }

    let normalizer = args.config.normalizer()?;
    let mut descriptors: Vec<EndpointDescriptor> = Vec::new();
    for path in &args.descriptors {
        let doc = read_document(path)?;
        descriptors.extend(extract_endpoints_with(&doc, &normalizer));
    }
    for path in &args.endpoints {
        let text = fs::read_to_string(path)?;
        let listed: Vec<EndpointDescriptor> = serde_json::from_str(&text)?;
        descriptors.extend(listed);
    }

    let schema = read_tree(&args.schema)?;
    let enriched = overlay_schema(schema, &descriptors);

    let text = match Format::resolve(args.format, args.output.as_deref()) {
        SourceFormat::Json => serde_json::to_string_pretty(&enriched)?,
        SourceFormat::Yaml => serde_yaml::to_string(&enriched)?,
    };
    write_output(args.output.as_deref(), &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    const GENERATED: &str = r#"{
  "openapi": "3.0.2",
  "info": { "title": "MLServer APIs", "version": "1.0" },
  "paths": {
    "/v2/health/live": {
      "get": { "operationId": "live_v2_health_live_get" }
    },
    "/v2/repository/index": {
      "post": { "operationId": "index_v2_repository_index_post" }
    }
  }
}"#;

    #[test]
    fn test_execute_enriches_generated_schema() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("generated.json");
        let dataplane = dir.path().join("dataplane.yaml");
        let listed = dir.path().join("endpoints.json");
        let output = dir.path().join("enriched.json");
        fs::write(&schema, GENERATED).unwrap();
        fs::write(
            &dataplane,
            "paths:\n  /v2/health/live:\n    get:\n      summary: Alive\n      description: Liveness\n",
        )
        .unwrap();
        fs::write(
            &listed,
            r#"[{ "path": "/v2/health/live", "operation": "get", "summary": "Server is live" },
               { "path": "/v2/repository/index", "operation": "post", "desc": "Index" }]"#,
        )
        .unwrap();

        execute(&OverlayArgs {
            schema,
            descriptors: vec![dataplane],
            endpoints: vec![listed],
            output: Some(output.clone()),
            format: None,
            config: ConfigArgs::default(),
        })
        .unwrap();

        let enriched: Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        let live = &enriched["paths"]["/v2/health/live"]["get"];
        assert_eq!(live["summary"], "Server is live");
        assert_eq!(live["description"], "Liveness");
        assert_eq!(live["operationId"], "live_v2_health_live_get");
        assert_eq!(
            enriched["paths"]["/v2/repository/index"]["post"],
            json!({ "operationId": "index_v2_repository_index_post", "description": "Index" })
        );
    }

    #[test]
    fn test_execute_bad_descriptor_list() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("generated.json");
        let listed = dir.path().join("endpoints.json");
        fs::write(&schema, GENERATED).unwrap();
        fs::write(&listed, r#"[{ "path": "/v2", "operation": "fetch" }]"#).unwrap();

        let err = execute(&OverlayArgs {
            schema,
            descriptors: Vec::new(),
            endpoints: vec![listed],
            output: None,
            format: None,
            config: ConfigArgs::default(),
        })
        .unwrap_err();
        assert!(matches!(err, crate::error::CliError::Json(_)));
    }

    #[test]
    fn test_execute_matches_paths_rewritten_by_config() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("generated.json");
        let tenants = dir.path().join("tenants.yaml");
        let config = dir.path().join("merge.yaml");
        let output = dir.path().join("enriched.json");
        fs::write(
            &schema,
            r#"{ "paths": { "/v2/{tenant}/health": { "get": { "operationId": "health" } } } }"#,
        )
        .unwrap();
        fs::write(
            &tenants,
            "paths:\n  /v2/${TENANT}/health:\n    get:\n      summary: Tenant health\n",
        )
        .unwrap();
        fs::write(
            &config,
            "path_rules:\n  - pattern: '\\$\\{TENANT\\}'\n    replacement: '{tenant}'\n",
        )
        .unwrap();

        execute(&OverlayArgs {
            schema,
            descriptors: vec![tenants],
            endpoints: Vec::new(),
            output: Some(output.clone()),
            format: None,
            config: ConfigArgs {
                config: Some(config),
            },
        })
        .unwrap();

        let enriched: Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(
            enriched["paths"]["/v2/{tenant}/health"]["get"],
            json!({ "operationId": "health", "summary": "Tenant health" })
        );
    }
}
