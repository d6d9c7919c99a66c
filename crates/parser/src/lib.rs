//! OpenAPI document processing
//!
//! This crate turns raw OpenAPI/Swagger documents (as tagged JSON values)
//! into forms downstream consumers can use directly:
//!
//! - `$ref` dereferencing, both same-document and cross-document
//! - Subsetting a document to one route or operationId
//! - Swagger 2.0 upgrade via an external converter
//! - Flattening every `path × method` pair into a self-contained
//!   operation with merged input and output schemas
//!
//! Documents are traversed as `serde_json::Value` rather than a typed
//! model, since inputs may be Swagger 2.0, partially invalid, or use
//! vendor extensions a strict model would reject.

mod deref;
mod json_pointer;
mod normalize;
mod operations;

pub use deref::{dereference, dereference_remote};
pub use json_pointer::{encode_token, get as pointer_get, set as pointer_set};
pub use normalize::{needs_upgrade, rename_refs, subset, upgrade, RefConvention};
pub use operations::{find_refs, flatten, match_operation, MatchedOperation};

use openapi_scout_common::Result;
use serde_json::Value;

/// Parse a spec body as JSON first, then as YAML
///
/// # Arguments
/// * `text` - Raw document text in either syntax
///
/// # Returns
/// * The parsed document as a tagged JSON value
pub fn parse_document(text: &str) -> Result<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_yaml::from_str(text)?),
    }
}
