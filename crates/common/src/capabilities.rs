//! Capability traits for external collaborators
//!
//! The core never talks to the network or a store directly; it is handed
//! these traits. Concrete adapters live in the probe crate (reqwest) and the
//! CLI crate (file-backed cache); tests substitute mocks.

use crate::types::FetchedText;
use crate::Result;
use serde_json::Value;
use std::time::Duration;

/// Key-value cache with per-key TTL
///
/// Used for hostname→URL mappings (TTL 30 days). Writes are idempotent, so
/// no locking discipline beyond atomic per-key get/put/delete is required.
pub trait SpecCache {
    /// Look up a key; `None` means absent or expired
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value with a time-to-live
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

/// Outbound HTTP fetch
///
/// Non-2xx responses are returned as values, not errors; only transport
/// failures surface as [`ScoutError::Upstream`].
///
/// [`ScoutError::Upstream`]: crate::ScoutError::Upstream
pub trait RemoteFetch {
    /// Fetch a URL as text
    fn fetch_text(&self, url: &str) -> Result<FetchedText>;

    /// Fetch a URL as JSON, passing caller-supplied headers through
    /// (used when dereferencing remote refs)
    fn fetch_json(&self, url: &str, headers: &[(String, String)]) -> Result<Value>;
}

/// Remote Swagger 2.0 → OpenAPI 3.x conversion service
///
/// Adapters must enforce a hard 10-second timeout; on timeout or failure the
/// caller reports conversion failure rather than guessing.
pub trait SwaggerConverter {
    /// Convert the Swagger document at `swagger_url`, returning the
    /// converted OpenAPI document
    fn convert(&self, swagger_url: &str) -> Result<Value>;
}
