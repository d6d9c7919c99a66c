//! Data structures exchanged between the probe, parser, and generator crates

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// HTTP methods the operation flattener walks on each path item
pub const ALLOWED_METHODS: [&str; 7] = ["get", "post", "put", "patch", "delete", "head", "options"];

/// Normalized content type of a discovered spec body
///
/// Downstream consumers need the exact original bytes, so the probe reports
/// which syntax the body parsed as rather than re-serializing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecContentType {
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "text/yaml")]
    Yaml,
}

impl SpecContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecContentType::Json => "application/json",
            SpecContentType::Yaml => "text/yaml",
        }
    }
}

/// A successfully discovered spec location
///
/// Produced by the probe; cached keyed by hostname with a 30-day expiry and
/// evicted when the cached URL stops validating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecLocation {
    /// Hostname the probe was asked to resolve
    pub hostname: String,

    /// URL the spec was found at
    #[serde(rename = "redirectUrl")]
    pub resolved_url: String,

    /// Normalized content type of the body
    #[serde(rename = "contentType")]
    pub content_type: SpecContentType,

    /// Exact original body text, not a re-serialized form
    #[serde(rename = "text")]
    pub raw_text: String,
}

impl SpecLocation {
    /// Base URL for the API the document describes
    ///
    /// The first declared server wins; a document with no servers is
    /// attributed to the host the spec itself was found on.
    pub fn base_url(&self, document: &Value) -> String {
        if let Some(url) = document
            .get("servers")
            .and_then(Value::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(Value::as_str)
        {
            if !url.is_empty() {
                return url.to_string();
            }
        }
        format!("https://{}", self.hostname)
    }
}

/// A fetched HTTP response body, as produced by the [`RemoteFetch`] capability
///
/// [`RemoteFetch`]: crate::RemoteFetch
#[derive(Debug, Clone)]
pub struct FetchedText {
    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: String,

    /// `Content-Type` response header, if any
    pub content_type: Option<String>,
}

impl FetchedText {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-status merged response schema for a flattened operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSchema {
    /// Declared status code, kept as the document's string key
    pub status: String,

    /// Response description from the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Headers schema merged with all media-type schemas for this status
    #[serde(rename = "mergedSchema")]
    pub merged_schema: Value,
}

/// One flattened `(path, method)` operation with merged input/output schemas
///
/// Field names serialize in camelCase, matching the exposed JSON shape.
/// `operation_id` is synthesized as `"{path-without-leading-slash}__{method}"`
/// when the document omits it; uniqueness is NOT guaranteed by the source
/// document and consumers must tolerate collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedOperation {
    /// URL the source document was retrieved from
    #[serde(rename = "openapiUrl")]
    pub openapi_url: String,

    /// Document operationId, or the synthesized `path__method` fallback
    #[serde(rename = "operationId")]
    pub operation_id: String,

    /// Identifier of the source document (provider slug or URL)
    #[serde(rename = "openapiId", skip_serializing_if = "Option::is_none")]
    pub openapi_id: Option<String>,

    /// Path key in the document's `paths` object
    pub path: String,

    /// Lowercase HTTP method
    pub method: String,

    /// Effective servers, each resolved to an absolute origin
    #[serde(rename = "serversWithOrigin")]
    pub servers_with_origin: Vec<Value>,

    /// The raw operation object from the document
    pub operation: Value,

    /// Resolved parameters (operation-level merged over path-item-level)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Value>>,

    /// Request body schema for `application/json`, local refs resolved
    #[serde(
        rename = "resolvedRequestBodySchema",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_request_body_schema: Option<Value>,

    /// One merged schema per declared status code
    #[serde(rename = "responseStatusSchemas")]
    pub response_status_schemas: Vec<StatusSchema>,

    /// All accepted inputs (parameters + body) as one object schema;
    /// absent when it would have zero properties
    #[serde(rename = "mergedInputSchema", skip_serializing_if = "Option::is_none")]
    pub merged_input_schema: Option<Value>,

    /// All possible outputs across status codes as one object schema;
    /// absent when it would have zero properties
    #[serde(rename = "mergedOutputSchema", skip_serializing_if = "Option::is_none")]
    pub merged_output_schema: Option<Value>,

    /// Component schemas actually referenced by the merged schemas, renamed
    /// to the bare `#/definitions/` convention. A referenced name missing
    /// from the document is included with a placeholder description so
    /// callers can detect broken refs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Value>,
}
