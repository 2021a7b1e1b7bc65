#![deny(missing_docs)]

//! # Endpoint Extraction
//!
//! Flattens a document into `(path, method, summary, description)` descriptors,
//! the metadata later overlaid onto a schema generated from live routes.

use crate::oas::document::Document;
use crate::oas::paths::{default_normalizer, PathNormalizer};
use serde::{Deserialize, Serialize};
use serde_json::{map, Value};
use std::fmt::Display;
use std::str::FromStr;

/// The closed set of OpenAPI operation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
    /// `head`
    Head,
    /// `options`
    Options,
    /// `trace`
    Trace,
}

impl HttpMethod {
    /// All methods, in OpenAPI declaration order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    /// The lowercase key used inside a path item.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Parses a path item key. Matching is case-sensitive, as in OpenAPI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("'{}' is not an operation key", s))
    }
}

/// Human-authored metadata for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Normalized path template.
    pub path: String,
    /// Operation key.
    pub operation: HttpMethod,
    /// Short summary, when the document has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description, when the document has one.
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lazy iterator over the endpoints of a document.
///
/// Order follows the document's path order, then the method keys' order within
/// each path item. Cloning the iterator, or calling [`extract_endpoints`]
/// again, restarts the walk.
#[derive(Debug, Clone)]
pub struct Endpoints<'a> {
    normalizer: &'a PathNormalizer,
    paths: map::Iter<'a>,
    current: Option<(String, map::Iter<'a>)>,
}

impl<'a> Iterator for Endpoints<'a> {
    type Item = EndpointDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, operations)) = self.current.as_mut() {
                for (key, operation) in operations.by_ref() {
                    let Ok(method) = key.parse::<HttpMethod>() else {
                        continue;
                    };
                    return Some(EndpointDescriptor {
                        path: path.clone(),
                        operation: method,
                        summary: text_field(operation, "summary"),
                        description: text_field(operation, "description"),
                    });
                }
            }

            let (path, item) = self.paths.next()?;
            self.current = item
                .as_object()
                .map(|operations| (self.normalizer.normalize(path), operations.iter()));
        }
    }
}

fn text_field(operation: &Value, field: &str) -> Option<String> {
    operation
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Starts a walk over the endpoints of `doc`, normalizing paths with the
/// built-in rules.
pub fn extract_endpoints(doc: &Document) -> Endpoints<'_> {
    extract_endpoints_with(doc, default_normalizer())
}

/// Starts a walk over the endpoints of `doc`, normalizing paths with
/// `normalizer` (e.g. one built from configured path rules).
pub fn extract_endpoints_with<'a>(
    doc: &'a Document,
    normalizer: &'a PathNormalizer,
) -> Endpoints<'a> {
    Endpoints {
        normalizer,
        paths: doc.paths().iter(),
        current: None,
    }
}
