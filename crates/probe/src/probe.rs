//! Hostname probing with cache revalidation

use crate::paths::CANDIDATE_PATHS;
use crate::validate::validate_spec_body;
use openapi_scout_common::{RemoteFetch, Result, SpecCache, SpecContentType, SpecLocation};
use std::time::Duration;

/// How long a discovered location stays cached
const CACHE_TTL: Duration = Duration::from_secs(86400 * 30);

/// Discovers the spec URL for a hostname
///
/// A cached hit is revalidated before use and evicted if it stopped
/// validating; otherwise every candidate path is probed in order and the
/// first validating body wins.
pub struct SpecProbe<'a> {
    cache: &'a dyn SpecCache,
    fetch: &'a dyn RemoteFetch,
}

impl<'a> SpecProbe<'a> {
    pub fn new(cache: &'a dyn SpecCache, fetch: &'a dyn RemoteFetch) -> Self {
        SpecProbe { cache, fetch }
    }

    /// Check one URL, returning the body and its syntax when it validates
    ///
    /// Transport errors and non-2xx responses count as "not here", not as
    /// failures; the probe moves on to the next candidate.
    fn check_url(&self, url: &str) -> Option<(SpecContentType, String)> {
        let fetched = self.fetch.fetch_text(url).ok()?;
        if !fetched.is_success() {
            return None;
        }
        let content_type = validate_spec_body(&fetched.body)?;
        Some((content_type, fetched.body))
    }

    /// Resolve a hostname to its spec location
    ///
    /// # Arguments
    /// * `hostname` - Bare hostname, e.g. `api.example.com`
    ///
    /// # Returns
    /// * The discovered location, or `None` when no candidate validates
    pub fn resolve(&self, hostname: &str) -> Result<Option<SpecLocation>> {
        if let Some(cached_url) = self.cache.get(hostname)? {
            if let Some((content_type, body)) = self.check_url(&cached_url) {
                return Ok(Some(SpecLocation {
                    hostname: hostname.to_string(),
                    resolved_url: cached_url,
                    content_type,
                    raw_text: body,
                }));
            }
            // stale entry, evict before probing from scratch
            self.cache.delete(hostname)?;
        }

        for path in CANDIDATE_PATHS {
            let url = format!("https://{hostname}{path}");
            if let Some((content_type, body)) = self.check_url(&url) {
                self.cache.put(hostname, &url, CACHE_TTL)?;
                return Ok(Some(SpecLocation {
                    hostname: hostname.to_string(),
                    resolved_url: url,
                    content_type,
                    raw_text: body,
                }));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use openapi_scout_common::FetchedText;
    use serde_json::Value;

    mock! {
        Cache {}
        impl SpecCache for Cache {
            fn get(&self, key: &str) -> Result<Option<String>>;
            fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
            fn delete(&self, key: &str) -> Result<()>;
        }
    }

    mock! {
        Fetch {}
        impl RemoteFetch for Fetch {
            fn fetch_text(&self, url: &str) -> Result<FetchedText>;
            fn fetch_json(&self, url: &str, headers: &[(String, String)]) -> Result<Value>;
        }
    }

    fn spec_response() -> FetchedText {
        FetchedText {
            status: 200,
            body: r#"{"openapi": "3.0.0", "paths": {}}"#.to_string(),
            content_type: Some("application/json".to_string()),
        }
    }

    fn not_found() -> FetchedText {
        FetchedText {
            status: 404,
            body: "not found".to_string(),
            content_type: None,
        }
    }

    #[test]
    fn test_first_validating_candidate_wins_and_is_cached() {
        let mut cache = MockCache::new();
        cache
            .expect_get()
            .with(eq("api.example.com"))
            .returning(|_| Ok(None));
        cache
            .expect_put()
            .with(
                eq("api.example.com"),
                eq("https://api.example.com/openapi.yaml"),
                eq(CACHE_TTL),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut fetch = MockFetch::new();
        fetch.expect_fetch_text().returning(|url| {
            if url == "https://api.example.com/openapi.yaml" {
                Ok(FetchedText {
                    status: 200,
                    body: "openapi: 3.0.0\npaths: {}\n".to_string(),
                    content_type: Some("text/yaml".to_string()),
                })
            } else {
                Ok(not_found())
            }
        });

        let probe = SpecProbe::new(&cache, &fetch);
        let location = probe.resolve("api.example.com").unwrap().unwrap();
        assert_eq!(location.resolved_url, "https://api.example.com/openapi.yaml");
        assert_eq!(location.content_type, SpecContentType::Yaml);
        assert_eq!(location.raw_text, "openapi: 3.0.0\npaths: {}\n");
    }

    #[test]
    fn test_cache_hit_is_revalidated_not_trusted() {
        let mut cache = MockCache::new();
        cache
            .expect_get()
            .returning(|_| Ok(Some("https://api.example.com/v3/openapi.json".to_string())));

        let mut fetch = MockFetch::new();
        fetch
            .expect_fetch_text()
            .with(eq("https://api.example.com/v3/openapi.json"))
            .times(1)
            .returning(|_| Ok(spec_response()));

        let probe = SpecProbe::new(&cache, &fetch);
        let location = probe.resolve("api.example.com").unwrap().unwrap();
        assert_eq!(
            location.resolved_url,
            "https://api.example.com/v3/openapi.json"
        );
    }

    #[test]
    fn test_stale_cache_entry_evicted_then_reprobed() {
        let mut cache = MockCache::new();
        cache
            .expect_get()
            .returning(|_| Ok(Some("https://api.example.com/gone.json".to_string())));
        cache
            .expect_delete()
            .with(eq("api.example.com"))
            .times(1)
            .returning(|_| Ok(()));
        cache.expect_put().returning(|_, _, _| Ok(()));

        let mut fetch = MockFetch::new();
        fetch.expect_fetch_text().returning(|url| {
            if url == "https://api.example.com/openapi.json" {
                Ok(spec_response())
            } else {
                Ok(not_found())
            }
        });

        let probe = SpecProbe::new(&cache, &fetch);
        let location = probe.resolve("api.example.com").unwrap().unwrap();
        assert_eq!(location.resolved_url, "https://api.example.com/openapi.json");
    }

    #[test]
    fn test_no_candidate_validates() {
        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| Ok(None));

        let mut fetch = MockFetch::new();
        fetch.expect_fetch_text().returning(|_| Ok(not_found()));

        let probe = SpecProbe::new(&cache, &fetch);
        assert!(probe.resolve("api.example.com").unwrap().is_none());
    }

    #[test]
    fn test_transport_errors_do_not_abort_the_probe() {
        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_put().returning(|_, _, _| Ok(()));

        let mut fetch = MockFetch::new();
        fetch.expect_fetch_text().returning(|url| {
            if url == "https://api.example.com/openapi.json" {
                Err(openapi_scout_common::ScoutError::Upstream(
                    "connection reset".to_string(),
                ))
            } else if url == "https://api.example.com/openapi.yaml" {
                Ok(spec_response())
            } else {
                Ok(not_found())
            }
        });

        let probe = SpecProbe::new(&cache, &fetch);
        let location = probe.resolve("api.example.com").unwrap().unwrap();
        assert_eq!(location.resolved_url, "https://api.example.com/openapi.yaml");
    }
}
