//! Markdown API reference for a whole document
//!
//! Renders info, servers, authentication, per-tag endpoint sections, and a
//! models appendix. Schemas print in a compact pseudo-TypeScript notation
//! with constraints inline. Expects a dereferenced document.

use serde_json::Value;

fn status_text(code: &str) -> &'static str {
    match code {
        "200" => "OK",
        "201" => "Created",
        "204" => "No Content",
        "400" => "Bad Request",
        "401" => "Unauthorized",
        "403" => "Forbidden",
        "404" => "Not Found",
        "500" => "Internal Server Error",
        _ => "",
    }
}

fn scalar_suffix(schema: &Value) -> String {
    let mut out = String::new();
    if let Some(variants) = schema.get("enum").and_then(Value::as_array) {
        let listed: Vec<String> = variants
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        out.push_str(&format!(" (one of: {})", listed.join(", ")));
    }
    if let Some(format) = schema.get("format").and_then(Value::as_str) {
        out.push_str(&format!(" ({format})"));
    }
    out
}

/// Compact pseudo-TypeScript rendering of a schema
fn format_schema(schema: &Value, indent: usize) -> String {
    let indent_str = "  ".repeat(indent);

    if schema.is_null() {
        return "any".to_string();
    }

    let schema_type = schema.get("type").and_then(Value::as_str);
    let properties = schema.get("properties").and_then(Value::as_object);

    if schema_type == Some("object") && properties.is_some() {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut out = String::from("{\n");
        if let Some(props) = properties {
            for (name, prop) in props {
                let required_mark = if required.contains(&name.as_str()) {
                    " (Required)"
                } else {
                    ""
                };
                out.push_str(&format!("{indent_str}  {name}{required_mark}: "));

                if let Some(description) = prop.get("description").and_then(Value::as_str) {
                    out.push_str(&format!("// {description}\n{indent_str}  "));
                }

                let prop_type = prop.get("type").and_then(Value::as_str);
                if prop_type == Some("object") && prop.get("properties").is_some() {
                    out.push_str(&format_schema(prop, indent + 1));
                } else if prop_type == Some("array") && prop.get("items").is_some() {
                    let items = &prop["items"];
                    out.push_str("array<");
                    if items.get("type").and_then(Value::as_str) == Some("object")
                        && items.get("properties").is_some()
                    {
                        out.push_str(&format_schema(items, indent + 1));
                    } else {
                        out.push_str(items.get("type").and_then(Value::as_str).unwrap_or("any"));
                        out.push_str(&scalar_suffix(items));
                    }
                    out.push('>');
                } else {
                    out.push_str(prop_type.unwrap_or("any"));
                    out.push_str(&scalar_suffix(prop));
                    if let Some(pattern) = prop.get("pattern").and_then(Value::as_str) {
                        out.push_str(&format!(" (pattern: {pattern})"));
                    }
                    let minimum = prop.get("minimum");
                    let maximum = prop.get("maximum");
                    if minimum.is_some() || maximum.is_some() {
                        let low = minimum.map_or("-inf".to_string(), Value::to_string);
                        let high = maximum.map_or("inf".to_string(), Value::to_string);
                        out.push_str(&format!(" (range: {low} to {high})"));
                    }
                    if let Some(default) = prop.get("default") {
                        out.push_str(&format!(" = {default}"));
                    }
                }
                out.push_str(",\n");
            }
        }
        out.push_str(&format!("{indent_str}}}"));
        out
    } else if schema_type == Some("array") && schema.get("items").is_some() {
        let items = &schema["items"];
        let mut out = String::from("array<");
        if items.get("type").and_then(Value::as_str) == Some("object")
            && items.get("properties").is_some()
        {
            out.push_str(&format_schema(items, indent));
        } else {
            out.push_str(items.get("type").and_then(Value::as_str).unwrap_or("any"));
            out.push_str(&scalar_suffix(items));
        }
        out.push('>');
        out
    } else {
        format!("{}{}", schema_type.unwrap_or("any"), scalar_suffix(schema))
    }
}

fn format_security(security: &Value) -> String {
    let schemes = match security.as_array() {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };
    let mut out = String::from("### Security\n\n");
    for scheme in schemes {
        if let Some(map) = scheme.as_object() {
            for (name, scopes) in map {
                out.push_str(&format!("* {name}"));
                if let Some(scopes) = scopes.as_array() {
                    if !scopes.is_empty() {
                        let listed: Vec<&str> =
                            scopes.iter().filter_map(Value::as_str).collect();
                        out.push_str(&format!(" (scopes: {})", listed.join(", ")));
                    }
                }
                out.push('\n');
            }
        }
    }
    out.push('\n');
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn format_parameters(parameters: &Value) -> String {
    let params = match parameters.as_array() {
        Some(p) if !p.is_empty() => p,
        _ => return String::new(),
    };
    let mut out = String::from("### Parameters\n\n");

    // group by location, keeping first-seen order
    let mut locations: Vec<&str> = vec![];
    for param in params {
        if let Some(location) = param.get("in").and_then(Value::as_str) {
            if !locations.contains(&location) {
                locations.push(location);
            }
        }
    }

    for location in locations {
        out.push_str(&format!("#### {} Parameters\n\n", capitalize(location)));
        for param in params
            .iter()
            .filter(|p| p.get("in").and_then(Value::as_str) == Some(location))
        {
            let name = param.get("name").and_then(Value::as_str).unwrap_or("");
            let required = param
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            out.push_str(&format!(
                "* `{name}`{}",
                if required { " (Required)" } else { "" }
            ));
            if let Some(description) = param.get("description").and_then(Value::as_str) {
                out.push_str(&format!("\n  {description}"));
            }
            if let Some(schema) = param.get("schema") {
                if !schema.is_null() {
                    out.push_str(&format!("\n  Type: {}", format_schema(schema, 0)));
                }
            }
            if let Some(example) = param.get("example") {
                out.push_str(&format!("\n  Example: {example}"));
            }
            out.push_str("\n\n");
        }
    }
    out
}

fn format_responses(responses: &Value) -> String {
    let mut out = String::from("### Responses\n\n");
    let responses = match responses.as_object() {
        Some(r) => r,
        None => return out,
    };

    for (code, response) in responses {
        let description = response
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("No description");
        out.push_str(&format!("* **{code}** {}: {description}\n", status_text(code)));

        if let Some(content) = response.get("content").and_then(Value::as_object) {
            for (content_type, media) in content {
                if let Some(schema) = media.get("schema") {
                    out.push_str(&format!("\n  Content-Type: `{content_type}`\n\n"));
                    let rendered = format_schema(schema, 0).replace('\n', "\n  ");
                    out.push_str(&format!("  Schema:\n  ```typescript\n  {rendered}\n  ```\n"));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the full markdown reference for a document
pub fn generate_api_docs(document: &Value) -> String {
    let mut out = String::new();

    let info = document.get("info");
    let title = info
        .and_then(|i| i.get("title"))
        .and_then(Value::as_str)
        .unwrap_or("API");
    let version = info
        .and_then(|i| i.get("version"))
        .and_then(Value::as_str)
        .unwrap_or("");
    out.push_str(&format!("# {title} {version}\n\n"));
    if let Some(description) = info
        .and_then(|i| i.get("description"))
        .and_then(Value::as_str)
    {
        out.push_str(&format!("{description}\n\n"));
    }

    if let Some(servers) = document.get("servers").and_then(Value::as_array) {
        if !servers.is_empty() {
            out.push_str("## Servers\n\n");
            for server in servers {
                let url = server.get("url").and_then(Value::as_str).unwrap_or("");
                match server.get("description").and_then(Value::as_str) {
                    Some(description) => {
                        out.push_str(&format!("* {url} - {description}\n"));
                    }
                    None => out.push_str(&format!("* {url}\n")),
                }
            }
            out.push('\n');
        }
    }

    if let Some(schemes) = document
        .get("components")
        .and_then(|c| c.get("securitySchemes"))
        .and_then(Value::as_object)
    {
        out.push_str("## Authentication\n\n");
        for (name, scheme) in schemes {
            out.push_str(&format!("### {name}\n\n"));
            let scheme_type = scheme.get("type").and_then(Value::as_str).unwrap_or("");
            out.push_str(&format!("Type: {scheme_type}\n"));
            if let Some(description) = scheme.get("description").and_then(Value::as_str) {
                out.push_str(&format!("\n{description}\n"));
            }
            if scheme_type == "oauth2" {
                if let Some(flows) = scheme.get("flows").and_then(Value::as_object) {
                    out.push_str("\nAvailable flows:\n\n");
                    for (flow_type, flow) in flows {
                        if flow.is_null() {
                            continue;
                        }
                        out.push_str(&format!("* {flow_type}\n"));
                        if let Some(url) = flow.get("authorizationUrl").and_then(Value::as_str) {
                            out.push_str(&format!("  * Authorization URL: {url}\n"));
                        }
                        if let Some(url) = flow.get("tokenUrl").and_then(Value::as_str) {
                            out.push_str(&format!("  * Token URL: {url}\n"));
                        }
                        if let Some(scopes) = flow.get("scopes").and_then(Value::as_object) {
                            out.push_str("  * Scopes:\n");
                            for (scope, description) in scopes {
                                let description =
                                    description.as_str().unwrap_or_default();
                                out.push_str(&format!("    * {scope}: {description}\n"));
                            }
                        }
                    }
                }
            }
            out.push('\n');
        }
    }

    out.push_str("## Endpoints\n\n");

    // group by tag, defaulting to "default"
    let mut tagged: Vec<(String, Vec<(&String, &str, &Value)>)> = vec![];
    if let Some(paths) = document.get("paths").and_then(Value::as_object) {
        for (path, path_item) in paths {
            let methods = match path_item.as_object() {
                Some(m) => m,
                None => continue,
            };
            for (method, operation) in methods {
                if !operation.is_object() {
                    continue;
                }
                let tags: Vec<String> = operation
                    .get("tags")
                    .and_then(Value::as_array)
                    .filter(|t| !t.is_empty())
                    .map(|t| t.iter().filter_map(Value::as_str).map(String::from).collect())
                    .unwrap_or_else(|| vec!["default".to_string()]);
                for tag in tags {
                    match tagged.iter_mut().find(|(name, _)| *name == tag) {
                        Some((_, ops)) => ops.push((path, method, operation)),
                        None => tagged.push((tag, vec![(path, method, operation)])),
                    }
                }
            }
        }
    }

    for (tag, operations) in &tagged {
        out.push_str(&format!("### {tag}\n\n"));

        for (path, method, operation) in operations {
            let upper = method.to_uppercase();
            let heading = operation
                .get("operationId")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("{upper} {path}"));
            out.push_str(&format!("#### {heading}\n\n"));

            if let Some(summary) = operation.get("summary").and_then(Value::as_str) {
                out.push_str(&format!("{summary}\n\n"));
            }
            if let Some(description) = operation.get("description").and_then(Value::as_str) {
                out.push_str(&format!("{description}\n\n"));
            }

            out.push_str(&format!("`{upper} {path}`\n\n"));

            if let Some(security) = operation.get("security") {
                out.push_str(&format_security(security));
            }
            if let Some(parameters) = operation.get("parameters") {
                out.push_str(&format_parameters(parameters));
            }
            if let Some(content) = operation
                .get("requestBody")
                .and_then(|b| b.get("content"))
                .and_then(Value::as_object)
            {
                out.push_str("### Request Body\n\n");
                for (content_type, media) in content {
                    out.push_str(&format!("Content-Type: `{content_type}`\n\n"));
                    if let Some(schema) = media.get("schema") {
                        out.push_str(&format!(
                            "Schema:\n```typescript\n{}\n```\n\n",
                            format_schema(schema, 0)
                        ));
                    }
                }
            }
            if let Some(responses) = operation.get("responses") {
                out.push_str(&format_responses(responses));
            }

            out.push_str("---\n\n");
        }
    }

    if let Some(schemas) = document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
    {
        out.push_str("## Models\n\n");
        for (name, schema) in schemas {
            out.push_str(&format!("### {name}\n\n"));
            out.push_str(&format!(
                "```typescript\n{}\n```\n\n",
                format_schema(schema, 0)
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "openapi": "3.0.0",
            "info": {
                "title": "Orders",
                "version": "1.2.0",
                "description": "Order management"
            },
            "servers": [
                {"url": "https://api.orders.example", "description": "Production"}
            ],
            "components": {
                "securitySchemes": {
                    "oauth": {
                        "type": "oauth2",
                        "flows": {
                            "clientCredentials": {
                                "tokenUrl": "https://auth.orders.example/token",
                                "scopes": {"orders:read": "Read orders"}
                            }
                        }
                    }
                },
                "schemas": {
                    "Order": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "state": {"type": "string", "enum": ["open", "shipped"]},
                            "quantity": {"type": "integer", "minimum": 1, "maximum": 100}
                        }
                    }
                }
            },
            "paths": {
                "/orders": {
                    "post": {
                        "operationId": "createOrder",
                        "summary": "Create an order",
                        "tags": ["orders"],
                        "security": [{"oauth": ["orders:read"]}],
                        "parameters": [
                            {"name": "X-Request-Id", "in": "header",
                             "description": "Correlation id",
                             "schema": {"type": "string"}}
                        ],
                        "requestBody": {
                            "content": {"application/json": {"schema": {
                                "type": "object",
                                "required": ["sku"],
                                "properties": {"sku": {"type": "string"}}
                            }}}
                        },
                        "responses": {
                            "201": {
                                "description": "Order created",
                                "content": {"application/json": {"schema": {
                                    "type": "object",
                                    "properties": {"id": {"type": "string"}}
                                }}}
                            },
                            "400": {"description": "Invalid input"}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_docs_cover_all_sections() {
        let docs = generate_api_docs(&sample_document());

        assert!(docs.starts_with("# Orders 1.2.0\n"));
        assert!(docs.contains("## Servers\n\n* https://api.orders.example - Production"));
        assert!(docs.contains("## Authentication"));
        assert!(docs.contains("* clientCredentials"));
        assert!(docs.contains("    * orders:read: Read orders"));
        assert!(docs.contains("### orders\n\n#### createOrder"));
        assert!(docs.contains("`POST /orders`"));
        assert!(docs.contains("#### Header Parameters"));
        assert!(docs.contains("* `X-Request-Id`"));
        assert!(docs.contains("* **201** Created: Order created"));
        assert!(docs.contains("* **400** Bad Request: Invalid input"));
        assert!(docs.contains("## Models\n\n### Order"));
    }

    #[test]
    fn test_format_schema_constraints_inline() {
        let rendered = format_schema(
            &json!({
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "string", "format": "uuid"},
                    "state": {"type": "string", "enum": ["open", "shipped"]},
                    "quantity": {"type": "integer", "minimum": 1, "maximum": 100},
                    "lines": {"type": "array", "items": {"type": "string"}}
                }
            }),
            0,
        );
        assert!(rendered.contains("id (Required): string (uuid)"));
        assert!(rendered.contains("state: string (one of: open, shipped)"));
        assert!(rendered.contains("quantity: integer (range: 1 to 100)"));
        assert!(rendered.contains("lines: array<string>"));
    }

    #[test]
    fn test_security_scopes() {
        let rendered = format_security(&json!([{"oauth": ["a", "b"]}, {"basic": []}]));
        assert!(rendered.contains("* oauth (scopes: a, b)"));
        assert!(rendered.contains("* basic\n"));
    }

    #[test]
    fn test_untagged_operations_grouped_as_default() {
        let document = json!({
            "info": {"title": "T", "version": "1"},
            "paths": {"/x": {"get": {"responses": {}}}}
        });
        let docs = generate_api_docs(&document);
        assert!(docs.contains("### default\n\n#### GET /x"));
    }
}
