//! Typed call-stub generation for a single operation
//!
//! Expects a dereferenced operation; any `$ref` still present falls back to
//! the trailing name of the pointer.

use crate::templates;
use openapi_scout_common::{Result, ScoutError};
use serde_json::Value;
use url::Url;

/// Convert a JSON Schema fragment to a TypeScript type expression
pub fn schema_to_ts(schema: &Value, indent_level: usize) -> String {
    if schema.is_null() {
        return "any".to_string();
    }

    let indent = "  ".repeat(indent_level);

    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        return reference
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("any")
            .to_string();
    }

    if let Some(variants) = schema.get("enum").and_then(Value::as_array) {
        return variants
            .iter()
            .map(|value| match value {
                Value::String(s) => format!("\"{s}\""),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ");
    }

    for (key, separator) in [("oneOf", " | "), ("anyOf", " | "), ("allOf", " & ")] {
        if let Some(variants) = schema.get(key).and_then(Value::as_array) {
            return variants
                .iter()
                .map(|s| schema_to_ts(s, indent_level))
                .collect::<Vec<_>>()
                .join(separator);
        }
    }

    let nullable = schema
        .get("nullable")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let with_null = |base: &str| {
        if nullable {
            format!("{base} | null")
        } else {
            base.to_string()
        }
    };

    match schema.get("type").and_then(Value::as_str) {
        Some("object") => {
            let properties = match schema.get("properties").and_then(Value::as_object) {
                Some(props) if !props.is_empty() => props,
                _ => return "{ [key: string]: any }".to_string(),
            };
            let required: Vec<&str> = schema
                .get("required")
                .and_then(Value::as_array)
                .map(|r| r.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            let fields = properties
                .iter()
                .map(|(key, prop)| {
                    let optional = if required.contains(&key.as_str()) { "" } else { "?" };
                    let type_str = schema_to_ts(prop, indent_level + 1);
                    let doc = prop
                        .get("description")
                        .and_then(Value::as_str)
                        .map(|d| format!("\n{indent}/** {d} */\n{indent}"))
                        .unwrap_or_default();
                    format!("{doc}\"{key}\"{optional}: {type_str};")
                })
                .collect::<Vec<_>>()
                .join(&format!("\n{indent}"));

            let closing = "  ".repeat(indent_level.saturating_sub(1));
            format!("{{\n{indent}{fields}\n{closing}}}")
        }
        Some("array") => {
            let items = schema.get("items").cloned().unwrap_or(Value::Null);
            format!("Array<{}>", schema_to_ts(&items, indent_level))
        }
        Some("string") => with_null("string"),
        Some("number") | Some("integer") => with_null("number"),
        Some("boolean") => with_null("boolean"),
        Some("null") => "null".to_string(),
        _ => "any".to_string(),
    }
}

/// Base URL for the stub: first valid server URL, else the document origin
fn base_url(openapi_url: &str, server: Option<&Value>) -> Result<String> {
    if let Some(raw) = server
        .and_then(|s| s.get("url"))
        .and_then(Value::as_str)
    {
        if Url::parse(raw).is_ok() {
            return Ok(raw.trim_end_matches('/').to_string());
        }
    }
    Url::parse(openapi_url)
        .map(|u| u.origin().ascii_serialization())
        .map_err(|e| {
            ScoutError::Generation(format!(
                "Unable to determine base URL from either servers or {openapi_url}: {e}"
            ))
        })
}

/// Object schema wrapping a parameter group, with descriptions carried over
fn parameter_group_schema(params: &[&Value], all_required: bool) -> Value {
    let required: Vec<Value> = params
        .iter()
        .filter(|p| {
            all_required || p.get("required").and_then(Value::as_bool).unwrap_or(false)
        })
        .filter_map(|p| p.get("name").cloned())
        .collect();
    let properties: serde_json::Map<String, Value> = params
        .iter()
        .filter_map(|p| {
            let name = p.get("name").and_then(Value::as_str)?;
            let mut schema = p.get("schema").cloned().unwrap_or(Value::Null);
            if let Some(description) = p.get("description") {
                if let Some(map) = schema.as_object_mut() {
                    map.insert("description".to_string(), description.clone());
                }
            }
            Some((name.to_string(), schema))
        })
        .collect();
    serde_json::json!({
        "type": "object",
        "required": required,
        "properties": properties,
    })
}

/// Renders a self-contained fetch stub for one operation
///
/// # Arguments
/// * `document` - The dereferenced document the operation came from
/// * `method` - Lowercase HTTP method
/// * `operation` - The dereferenced operation object
/// * `path` - Templated path the operation is declared under
/// * `openapi_url` - URL the document was retrieved from
/// * `is_exported` - Whether to emit a default export
pub fn generate_request_stub(
    document: &Value,
    method: &str,
    operation: &Value,
    path: &str,
    openapi_url: &str,
    is_exported: bool,
) -> Result<String> {
    let server = operation
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|s| s.first())
        .or_else(|| {
            document
                .get("servers")
                .and_then(Value::as_array)
                .and_then(|s| s.first())
        });
    let base_url = base_url(openapi_url, server)?;

    let empty = vec![];
    let parameters: Vec<&Value> = operation
        .get("parameters")
        .and_then(Value::as_array)
        .unwrap_or(&empty)
        .iter()
        .collect();

    let in_location = |location: &str| -> Vec<&Value> {
        parameters
            .iter()
            .filter(|p| p.get("in").and_then(Value::as_str) == Some(location))
            .copied()
            .collect()
    };
    let header_params = in_location("header");
    let query_params = in_location("query");
    let path_params = in_location("path");

    let request_body_schema = operation
        .get("requestBody")
        .and_then(|b| b.get("content"))
        .and_then(|c| c.get("application/json"))
        .and_then(|m| m.get("schema"));

    let mut request_properties: Vec<String> = vec![];
    if !header_params.is_empty() {
        let schema = parameter_group_schema(&header_params, false);
        request_properties.push(format!("headers: {}", schema_to_ts(&schema, 1)));
    }
    if !query_params.is_empty() {
        let schema = parameter_group_schema(&query_params, false);
        request_properties.push(format!("query: {}", schema_to_ts(&schema, 1)));
    }
    if !path_params.is_empty() {
        // path parameters are always required
        let schema = parameter_group_schema(&path_params, true);
        request_properties.push(format!("path: {}", schema_to_ts(&schema, 1)));
    }
    if let Some(body) = request_body_schema {
        request_properties.push(format!("body: {}", schema_to_ts(body, 1)));
    }

    let request_type = if request_properties.is_empty() {
        "type RequestType = Record<string, never>;".to_string()
    } else {
        format!(
            "type RequestType = {{\n  {};\n}};",
            request_properties.join(";\n  ")
        )
    };

    let success = operation.get("responses").and_then(|r| r.get("200"));
    let media_types: Vec<&str> = success
        .and_then(|s| s.get("content"))
        .and_then(Value::as_object)
        .map(|content| content.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let is_json = media_types.contains(&"application/json");
    let body_media_type = if is_json {
        Some("application/json")
    } else {
        media_types.first().copied()
    };
    let response_body_type = body_media_type
        .and_then(|mt| success?.get("content")?.get(mt)?.get("schema"))
        .map(|schema| schema_to_ts(schema, 1))
        .unwrap_or_else(|| "void".to_string());

    let response_headers_type = match success
        .and_then(|s| s.get("headers"))
        .and_then(Value::as_object)
    {
        Some(headers) => {
            let fields: String = headers
                .iter()
                .map(|(name, header)| {
                    let schema = header
                        .get("schema")
                        .cloned()
                        .unwrap_or_else(|| serde_json::json!({ "type": "string" }));
                    let doc = header
                        .get("description")
                        .and_then(Value::as_str)
                        .map(|d| format!("/** {d} */\n  "))
                        .unwrap_or_default();
                    format!(
                        "{doc}\"{}\": {};\n  ",
                        name.to_lowercase(),
                        schema_to_ts(&schema, 1)
                    )
                })
                .collect();
            format!(
                "{{\n  {fields}\n  // Allow additional string headers\n  \
                 [key: string]: string | number | boolean | undefined;\n}}"
            )
        }
        None => "Record<string, string>".to_string(),
    };

    let tera = templates::load_templates()?;
    let mut context = tera::Context::new();
    context.insert("path", path);
    context.insert("method", &method.to_uppercase());
    context.insert("base_url", &base_url);
    context.insert("is_exported", &is_exported);
    context.insert("request_type", &request_type);
    context.insert("response_headers_type", &response_headers_type);
    context.insert("response_body_type", &response_body_type);
    context.insert("has_path_params", &!path_params.is_empty());
    context.insert("has_query_params", &!query_params.is_empty());
    context.insert("has_header_params", &!header_params.is_empty());
    context.insert("has_body", &request_body_schema.is_some());
    context.insert("is_json", &is_json);

    tera.render("request.ts", &context)
        .map_err(|e| ScoutError::Generation(format!("Template error: {e}")))
}
