//! `$ref` dereferencing
//!
//! Two variants share the same cycle discipline: refs currently being
//! resolved are tracked in a per-call in-progress set, and a ref seen again
//! while still in progress is re-emitted as a `{"$ref": ...}` marker instead
//! of recursing. A per-call resolved cache (keyed by ref string) avoids
//! re-resolving the same ref used in multiple places. Both structures are
//! scoped to one top-level call; there are no global caches.

use crate::json_pointer;
use openapi_scout_common::{RemoteFetch, Result};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use url::Url;

/// Per-call dereferencing state
struct DerefState {
    /// Refs currently on the resolution stack (cycle detection)
    resolving: HashSet<String>,
    /// Refs fully resolved earlier in this call
    resolved: HashMap<String, Value>,
}

impl DerefState {
    fn new() -> Self {
        Self {
            resolving: HashSet::new(),
            resolved: HashMap::new(),
        }
    }
}

/// Resolves a local-only ref against the document
///
/// Returns `None` for remote refs, unsupported forms, and pointers into
/// paths that do not exist. `"#"` resolves to the whole document.
fn resolve_local_ref(document: &Value, ref_str: &str) -> Option<Value> {
    if ref_str.contains("://") || ref_str.starts_with("//") {
        return None;
    }
    if let Some(pointer) = ref_str.strip_prefix('#') {
        if pointer.is_empty() {
            return Some(document.clone());
        }
        return json_pointer::get(document, pointer).ok().cloned();
    }
    None
}

/// Recursively replaces every same-document `$ref` with its target
///
/// Identity on ref-free input. Unresolvable targets degrade to `null` so one
/// broken ref does not poison an otherwise-valid document; true cycles are
/// preserved as `{"$ref": ...}` markers.
pub fn dereference(document: &Value) -> Value {
    let mut state = DerefState::new();
    resolve_value(document, document, &mut state)
}

fn resolve_value(current: &Value, document: &Value, state: &mut DerefState) -> Value {
    match current {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, document, state))
                .collect(),
        ),
        Value::Object(map) => {
            if let Some(Value::String(ref_str)) = map.get("$ref") {
                return resolve_ref(ref_str, document, state);
            }
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                out.insert(key.clone(), resolve_value(value, document, state));
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

fn resolve_ref(ref_str: &str, document: &Value, state: &mut DerefState) -> Value {
    if state.resolving.contains(ref_str) {
        // Cycle: keep the pointer instead of recursing forever
        let mut marker = Map::new();
        marker.insert("$ref".to_string(), Value::String(ref_str.to_string()));
        return Value::Object(marker);
    }
    if let Some(resolved) = state.resolved.get(ref_str) {
        return resolved.clone();
    }

    state.resolving.insert(ref_str.to_string());
    let result = match resolve_local_ref(document, ref_str) {
        Some(target) => resolve_value(&target, document, state),
        None => Value::Null,
    };
    state.resolving.remove(ref_str);

    state.resolved.insert(ref_str.to_string(), result.clone());
    result
}

/// A ref split into its URL part and optional fragment, with the URL part
/// resolved against the base URL
struct NormalizedRef {
    url: String,
    hash: Option<String>,
}

fn normalize_ref(ref_str: &str, base_url: &str) -> Result<NormalizedRef> {
    let (url_part, hash) = match ref_str.split_once('#') {
        Some((url, hash)) => (url, Some(hash.to_string())),
        None => (ref_str, None),
    };

    let url = match Url::parse(url_part) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => {
            // Relative (or empty, meaning the same document): join against base
            let base = Url::parse(base_url).map_err(|e| {
                openapi_scout_common::ScoutError::RefResolution(format!(
                    "Invalid base URL '{base_url}': {e}"
                ))
            })?;
            base.join(url_part)
                .map_err(|e| {
                    openapi_scout_common::ScoutError::RefResolution(format!(
                        "Cannot resolve '{url_part}' against '{base_url}': {e}"
                    ))
                })?
                .to_string()
        }
    };

    Ok(NormalizedRef { url, hash })
}

/// Recursively replaces every `$ref`, fetching remote targets as JSON
///
/// Objects resolve all non-`$ref` siblings first, then the `$ref` itself;
/// the resolved target's keys are shallow-merged over the siblings (the ref
/// result wins on key collision). An unfetchable or unresolvable target
/// degrades to the sibling keys alone rather than aborting the whole
/// dereference. Caller-supplied headers pass through to the fetch.
pub fn dereference_remote(
    value: &Value,
    base_url: &str,
    fetcher: &dyn RemoteFetch,
    headers: &[(String, String)],
) -> Result<Value> {
    let mut state = DerefState::new();
    resolve_remote_value(value, base_url, fetcher, headers, &mut state)
}

fn resolve_remote_value(
    current: &Value,
    base_url: &str,
    fetcher: &dyn RemoteFetch,
    headers: &[(String, String)],
    state: &mut DerefState,
) -> Result<Value> {
    match current {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(resolve_remote_value(item, base_url, fetcher, headers, state)?);
            }
            Ok(Value::Array(out))
        }
        Value::Object(map) => {
            // Siblings act as defaults the resolved ref target overrides
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                if key == "$ref" {
                    continue;
                }
                out.insert(
                    key.clone(),
                    resolve_remote_value(value, base_url, fetcher, headers, state)?,
                );
            }

            let ref_str = match map.get("$ref") {
                Some(Value::String(s)) => s,
                _ => return Ok(Value::Object(out)),
            };

            match resolve_remote_ref(ref_str, base_url, fetcher, headers, state)? {
                Value::Object(target) => {
                    for (key, value) in target {
                        out.insert(key, value);
                    }
                    Ok(Value::Object(out))
                }
                Value::Null => Ok(Value::Object(out)),
                other if out.is_empty() => Ok(other),
                other => {
                    out.insert("value".to_string(), other);
                    Ok(Value::Object(out))
                }
            }
        }
        scalar => Ok(scalar.clone()),
    }
}

fn resolve_remote_ref(
    ref_str: &str,
    base_url: &str,
    fetcher: &dyn RemoteFetch,
    headers: &[(String, String)],
    state: &mut DerefState,
) -> Result<Value> {
    let normalized = normalize_ref(ref_str, base_url)?;
    let cache_key = match &normalized.hash {
        Some(hash) => format!("{}#{}", normalized.url, hash),
        None => normalized.url.clone(),
    };

    if state.resolving.contains(&cache_key) {
        let mut marker = Map::new();
        marker.insert("$ref".to_string(), Value::String(ref_str.to_string()));
        return Ok(Value::Object(marker));
    }
    if let Some(resolved) = state.resolved.get(&cache_key) {
        return Ok(resolved.clone());
    }

    let fetched = match fetcher.fetch_json(&normalized.url, headers) {
        Ok(json) => json,
        // Degrade instead of poisoning the whole document
        Err(_) => return Ok(Value::Null),
    };

    let target = match &normalized.hash {
        Some(hash) => match json_pointer::get(&fetched, hash) {
            Ok(value) => value.clone(),
            Err(_) => return Ok(Value::Null),
        },
        None => fetched,
    };

    state.resolving.insert(cache_key.clone());
    let result = resolve_remote_value(&target, &normalized.url, fetcher, headers, state)?;
    state.resolving.remove(&cache_key);

    state.resolved.insert(cache_key, result.clone());
    Ok(result)
}
