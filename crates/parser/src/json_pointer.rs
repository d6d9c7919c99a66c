//! JSON Pointer (RFC 6901) resolution against `serde_json` values

use openapi_scout_common::{Result, ScoutError};
use serde_json::Value;

/// Decodes a reference token: `~1` → `/`, `~0` → `~`
fn decode_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Encodes a reference token: `~` → `~0`, `/` → `~1`
pub fn encode_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn step<'a>(current: &'a Value, token: &str) -> Result<&'a Value> {
    match current {
        Value::Object(map) => map.get(token).ok_or_else(|| {
            ScoutError::RefResolution(format!("Property '{token}' does not exist"))
        }),
        Value::Array(items) => {
            let index: usize = token.parse().map_err(|_| {
                ScoutError::RefResolution(format!("Invalid array index '{token}'"))
            })?;
            items.get(index).ok_or_else(|| {
                ScoutError::RefResolution(format!("Array index {index} out of bounds"))
            })
        }
        Value::Null => Err(ScoutError::RefResolution(format!(
            "Cannot read property '{token}' of null"
        ))),
        _ => Err(ScoutError::RefResolution(format!(
            "Cannot read property '{token}' of a scalar"
        ))),
    }
}

/// Resolves a JSON pointer against a document
///
/// An empty pointer returns the whole document. A pointer that does not
/// start with `/`, or whose path does not exist, is an error.
pub fn get<'a>(doc: &'a Value, pointer: &str) -> Result<&'a Value> {
    if pointer.is_empty() {
        return Ok(doc);
    }
    if !pointer.starts_with('/') {
        return Err(ScoutError::RefResolution(
            "Invalid JSON Pointer: must start with \"/\"".to_string(),
        ));
    }

    let mut current = doc;
    for token in pointer[1..].split('/') {
        current = step(current, &decode_token(token))?;
    }
    Ok(current)
}

/// Sets a value in a document using a JSON pointer
///
/// The parent path must exist. The document root cannot be replaced in
/// place; `set(doc, "", v)` is rejected.
pub fn set(doc: &mut Value, pointer: &str, value: Value) -> Result<()> {
    if pointer.is_empty() {
        return Err(ScoutError::RefResolution(
            "Cannot set document root".to_string(),
        ));
    }
    if !pointer.starts_with('/') {
        return Err(ScoutError::RefResolution(
            "Invalid JSON Pointer: must start with \"/\"".to_string(),
        ));
    }

    let mut tokens: Vec<String> = pointer[1..].split('/').map(decode_token).collect();
    // split never returns an empty vec for a "/"-prefixed pointer
    let last = tokens.pop().unwrap_or_default();

    let mut current = doc;
    for token in &tokens {
        current = match current {
            Value::Object(map) => map.get_mut(token).ok_or_else(|| {
                ScoutError::RefResolution(format!("Property '{token}' does not exist"))
            })?,
            Value::Array(items) => {
                let index: usize = token.parse().map_err(|_| {
                    ScoutError::RefResolution(format!("Invalid array index '{token}'"))
                })?;
                items.get_mut(index).ok_or_else(|| {
                    ScoutError::RefResolution(format!("Array index {index} out of bounds"))
                })?
            }
            _ => {
                return Err(ScoutError::RefResolution(format!(
                    "Cannot read property '{token}' of a non-container"
                )))
            }
        };
    }

    match current {
        Value::Object(map) => {
            map.insert(last, value);
            Ok(())
        }
        Value::Array(items) => {
            let index: usize = last.parse().map_err(|_| {
                ScoutError::RefResolution(format!("Invalid array index '{last}'"))
            })?;
            if index >= items.len() {
                return Err(ScoutError::RefResolution(format!(
                    "Array index {index} out of bounds"
                )));
            }
            items[index] = value;
            Ok(())
        }
        _ => Err(ScoutError::RefResolution(format!(
            "Cannot set property '{last}' of a non-container"
        ))),
    }
}
