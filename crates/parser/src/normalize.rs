//! Document normalization: route subsets, Swagger upgrades, ref renaming

use crate::deref;
use openapi_scout_common::{Result, ScoutError, SwaggerConverter};
use serde_json::{Map, Value};

/// Methods scanned when matching a route against operationIds
const SUBSET_METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

/// Ref conventions a schema can be renamed between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefConvention {
    /// `#/components/schemas/X`
    OpenApi,
    /// `#/definitions/X` (bare JSON Schema)
    JsonSchema,
}

impl RefConvention {
    fn prefix(&self) -> &'static str {
        match self {
            RefConvention::OpenApi => "#/components/schemas/",
            RefConvention::JsonSchema => "#/definitions/",
        }
    }

    fn other(&self) -> RefConvention {
        match self {
            RefConvention::OpenApi => RefConvention::JsonSchema,
            RefConvention::JsonSchema => RefConvention::OpenApi,
        }
    }
}

/// Rewrites every `$ref` between the OpenAPI and bare JSON Schema
/// conventions by walking the parsed tree
///
/// Only `$ref` string values are touched, so unrelated string fields can
/// never produce false-positive substitutions.
pub fn rename_refs(value: &Value, to: RefConvention) -> Value {
    let from_prefix = to.other().prefix();
    let to_prefix = to.prefix();

    match value {
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| rename_refs(item, to)).collect())
        }
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                let renamed = match (key.as_str(), item) {
                    ("$ref", Value::String(ref_str)) => match ref_str.strip_prefix(from_prefix) {
                        Some(name) => Value::String(format!("{to_prefix}{name}")),
                        None => item.clone(),
                    },
                    _ => rename_refs(item, to),
                };
                out.insert(key.clone(), renamed);
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

/// Whether a document needs the Swagger 2.0 → OpenAPI 3.x upgrade
///
/// Detected when a `swagger` field is present, the `openapi` field is
/// missing, or the version string does not start with `"3."`.
pub fn needs_upgrade(document: &Value) -> bool {
    if document.get("swagger").is_some() {
        return true;
    }
    match document.get("openapi").and_then(Value::as_str) {
        Some(version) => !version.starts_with("3."),
        None => true,
    }
}

/// Upgrades a Swagger document by URL through the converter capability
///
/// The adapter enforces the 10-second timeout; a response without a usable
/// `openapi` field is a [`ScoutError::ConversionFailure`].
pub fn upgrade(swagger_url: &str, converter: &dyn SwaggerConverter) -> Result<Value> {
    let converted = converter.convert(swagger_url).map_err(|e| {
        ScoutError::ConversionFailure(format!("converter call for {swagger_url} failed: {e}"))
    })?;

    match converted.get("openapi").and_then(Value::as_str) {
        Some(_) => Ok(converted),
        None => Err(ScoutError::ConversionFailure(format!(
            "converter returned no openapi field for {swagger_url}"
        ))),
    }
}

/// Extracts the path items matching a route or operationId
///
/// An exact path-key match takes the whole path item; otherwise each
/// operation's `operationId` is scanned and only matching methods are kept.
fn matching_paths(paths: &Map<String, Value>, route: &str) -> Map<String, Value> {
    let mut matched = Map::new();

    for (path, path_item) in paths {
        if path == route {
            matched.insert(path.clone(), path_item.clone());
            break;
        }

        for method in SUBSET_METHODS {
            let operation_id = path_item
                .get(method)
                .and_then(|op| op.get("operationId"))
                .and_then(Value::as_str);
            if operation_id == Some(route) {
                let entry = matched
                    .entry(path.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let (Value::Object(item), Some(operation)) = (entry, path_item.get(method)) {
                    item.insert(method.to_string(), operation.clone());
                }
            }
        }
    }

    matched
}

/// Builds a route-scoped, self-contained subset of a document
///
/// An empty route returns the document unchanged. Matching path items are
/// dereferenced in place, and `tags`, `webhooks`, and `components` are
/// stripped from the output since dereferencing inlines everything the
/// subset needs.
pub fn subset(document: &Value, route_or_operation_id: &str) -> Result<Value> {
    if route_or_operation_id.is_empty() {
        return Ok(document.clone());
    }

    let paths = document
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| ScoutError::InvalidDocument("document has no paths object".to_string()))?;

    let matched = matching_paths(paths, route_or_operation_id);
    if matched.is_empty() {
        return Err(ScoutError::NotFound(format!(
            "no path or operationId matching '{route_or_operation_id}'"
        )));
    }

    let mut scoped = document.clone();
    if let Value::Object(map) = &mut scoped {
        map.insert("paths".to_string(), Value::Object(matched));
    }

    let mut dereferenced = deref::dereference(&scoped);
    if let Value::Object(map) = &mut dereferenced {
        map.remove("tags");
        map.remove("webhooks");
        map.remove("components");
    }

    Ok(dereferenced)
}
