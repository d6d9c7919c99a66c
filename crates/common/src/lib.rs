//! Common types and utilities for openapi-scout
//!
//! This crate contains the shared error type, the capability traits consumed
//! by the probe and parser crates (cache, remote fetch, Swagger conversion),
//! and the data structures exchanged between the pipeline stages.

mod capabilities;
mod types;

pub use capabilities::{RemoteFetch, SpecCache, SwaggerConverter};
pub use types::{
    FetchedText, ParsedOperation, SpecContentType, SpecLocation, StatusSchema, ALLOWED_METHODS,
};

use thiserror::Error;

/// Errors that can occur while resolving, normalizing, or transforming a spec
#[derive(Error, Debug)]
pub enum ScoutError {
    /// No candidate URL validated, or a route/operationId had no match
    #[error("Not found: {0}")]
    NotFound(String),

    /// Body is neither valid JSON nor valid YAML, or lacks the
    /// `openapi`/`swagger` marker field
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The Swagger upgrade timed out or returned no usable `openapi` field
    #[error("Conversion failure: {0}")]
    ConversionFailure(String),

    /// A remote ref could not be fetched, or a JSON-Pointer path does not exist
    #[error("Ref resolution failure: {0}")]
    RefResolution(String),

    /// A collaborator (cache, remote fetch) is unreachable
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// A template failed to load or render
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for openapi-scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;
