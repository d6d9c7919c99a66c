//! Spec body validation
//!
//! A body is accepted when it parses as JSON or YAML and carries a
//! string-typed `openapi` or `swagger` field at the top level. The original
//! text is never re-serialized; only the syntax it parsed as is reported.

use openapi_scout_common::SpecContentType;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Bodies larger than this get a cheap marker scan before a full parse
const PARTIAL_CHECK_THRESHOLD: usize = 100 * 1024;

fn marker_regex() -> Option<&'static Regex> {
    static MARKER: OnceLock<Option<Regex>> = OnceLock::new();
    MARKER
        .get_or_init(|| {
            // JSON key or YAML top-level key; loose on purpose, the full
            // parse below still decides acceptance
            Regex::new(r#""(openapi|swagger|paths|components)"\s*:|(?m)^(openapi|swagger|paths|components)\s*:"#)
                .ok()
        })
        .as_ref()
}

fn has_version_marker(value: &Value) -> bool {
    let string_field = |key: &str| value.get(key).is_some_and(Value::is_string);
    string_field("openapi") || string_field("swagger")
}

/// Validate a candidate body, reporting the syntax it parsed as
///
/// # Arguments
/// * `body` - Raw response text
///
/// # Returns
/// * The normalized content type, or `None` when the body is not a spec
pub fn validate_spec_body(body: &str) -> Option<SpecContentType> {
    // Large HTML error pages and asset blobs are common; skip the parse
    // when the first chunk carries neither version marker
    if body.len() > PARTIAL_CHECK_THRESHOLD {
        let head_end = (0..=PARTIAL_CHECK_THRESHOLD)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        if let Some(marker) = marker_regex() {
            if !marker.is_match(&body[..head_end]) {
                return None;
            }
        }
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return has_version_marker(&value).then_some(SpecContentType::Json);
    }
    if let Ok(value) = serde_yaml::from_str::<Value>(body) {
        return has_version_marker(&value).then_some(SpecContentType::Yaml);
    }
    None
}
