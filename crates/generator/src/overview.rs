//! Tag-grouped operation listing, as plain overview or agent skill

use crate::templates;
use openapi_scout_common::{Result, ScoutError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

/// Which rendition of the listing to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewKind {
    /// Human-readable overview with a header paragraph
    Overview,
    /// Skill file with a front-matter block for agent tooling
    Skill,
}

/// Methods listed in the overview (head and options are omitted as noise)
const LISTED_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

/// Untagged operations group under this marker, rendered as "Other" and
/// always sorted last
const NO_TAG: &str = "__untagged__";

/// Listings longer than this (serialized) drop the verb/path text per line
const LONG_DOCUMENT_CHARS: usize = 50_000;

#[derive(Debug, Clone, Serialize)]
struct OverviewItem {
    operation_id: String,
    link: String,
    path_part: String,
    summary: String,
}

#[derive(Debug, Serialize)]
struct TagGroup {
    name: String,
    description: Option<String>,
    items: Vec<OverviewItem>,
}

/// First server origin, preferring operation-level servers
fn server_origin(operation: Option<&Value>, document: &Value) -> String {
    let servers = operation
        .and_then(|op| op.get("servers"))
        .and_then(Value::as_array)
        .filter(|s| !s.is_empty())
        .or_else(|| document.get("servers").and_then(Value::as_array));

    let first = match servers.and_then(|s| s.first()) {
        Some(server) => server,
        None => return String::new(),
    };
    let raw = first.get("url").and_then(Value::as_str).unwrap_or_default();
    match Url::parse(raw) {
        Ok(url) => url.origin().ascii_serialization(),
        Err(_) => raw.split('/').next().unwrap_or_default().to_string(),
    }
}

fn slugify_hostname(hostname: &str) -> String {
    let mut slug = String::new();
    for c in hostname.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        } else {
            slug.push('-');
        }
    }
    // collapse runs and trim edge dashes
    let mut collapsed = String::new();
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
        .trim_matches('-')
        .chars()
        .take(64)
        .collect()
}

fn collect_groups(
    hostname: &str,
    document: &Value,
    link_base: &str,
) -> (Vec<TagGroup>, usize, bool) {
    let mut items_by_tag: BTreeMap<String, Vec<OverviewItem>> = BTreeMap::new();

    if let Some(paths) = document.get("paths").and_then(Value::as_object) {
        for (path, path_item) in paths {
            for method in LISTED_METHODS {
                let operation = match path_item.get(method) {
                    Some(op) if op.is_object() => op,
                    _ => continue,
                };

                let origin = server_origin(Some(operation), document);
                let operation_id = operation
                    .get("operationId")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();

                let query_string = operation
                    .get("parameters")
                    .and_then(Value::as_array)
                    .map(|params| {
                        params
                            .iter()
                            .filter(|p| p.get("in").and_then(Value::as_str) == Some("query"))
                            .filter_map(|p| {
                                let name = p.get("name").and_then(Value::as_str)?;
                                let ty = p
                                    .get("schema")
                                    .and_then(|s| s.get("type"))
                                    .and_then(Value::as_str)
                                    .unwrap_or(name);
                                Some(format!("{name}={ty}"))
                            })
                            .collect::<Vec<_>>()
                            .join("&")
                    })
                    .filter(|q| !q.is_empty())
                    .map(|q| format!("?{q}"))
                    .unwrap_or_default();

                let link = if operation_id.is_empty() {
                    format!("{link_base}/openapi/{hostname}{path}")
                } else {
                    format!("{link_base}/openapi/{hostname}/{operation_id}")
                };

                let item = OverviewItem {
                    operation_id,
                    link,
                    path_part: format!("{} {origin}{path}{query_string}", method.to_uppercase()),
                    summary: operation
                        .get("summary")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                };

                let tags: Vec<String> = operation
                    .get("tags")
                    .and_then(Value::as_array)
                    .filter(|tags| !tags.is_empty())
                    .map(|tags| {
                        tags.iter()
                            .filter_map(Value::as_str)
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(|| vec![NO_TAG.to_string()]);
                for tag in tags {
                    items_by_tag.entry(tag).or_default().push(item.clone());
                }
            }
        }
    }

    let endpoint_count = items_by_tag.values().map(Vec::len).sum();

    let all_items: Vec<&OverviewItem> = items_by_tag.values().flatten().collect();
    let is_long = serde_json::to_string(&all_items)
        .map(|s| s.len() > LONG_DOCUMENT_CHARS)
        .unwrap_or(false);

    let tag_descriptions: BTreeMap<&str, &str> = document
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|tag| {
                    Some((
                        tag.get("name")?.as_str()?,
                        tag.get("description")?.as_str()?,
                    ))
                })
                .collect()
        })
        .unwrap_or_default();

    let mut names: Vec<String> = items_by_tag.keys().cloned().collect();
    names.sort_by(|a, b| {
        if a == NO_TAG {
            std::cmp::Ordering::Greater
        } else if b == NO_TAG {
            std::cmp::Ordering::Less
        } else {
            a.cmp(b)
        }
    });

    let groups = names
        .into_iter()
        .map(|tag| {
            let mut items = items_by_tag.remove(&tag).unwrap_or_default();
            for item in &mut items {
                if is_long {
                    item.path_part.clear();
                }
            }
            TagGroup {
                description: tag_descriptions.get(tag.as_str()).map(|d| d.to_string()),
                name: if tag == NO_TAG { "Other".to_string() } else { tag },
                items,
            }
        })
        .collect();

    (groups, endpoint_count, is_long)
}

/// Renders the tag-grouped listing for a document
///
/// # Arguments
/// * `hostname` - Hostname the document was discovered on
/// * `document` - The (dereferenced) document
/// * `link_base` - Base URL for per-operation detail links
/// * `kind` - Plain overview or skill rendition
pub fn generate_overview(
    hostname: &str,
    document: &Value,
    link_base: &str,
    kind: OverviewKind,
) -> Result<String> {
    let tera = templates::load_templates()?;
    let (groups, endpoint_count, _is_long) = collect_groups(hostname, document, link_base);

    let mut context = tera::Context::new();
    context.insert("hostname", hostname);
    context.insert("link_base", link_base);
    context.insert("endpoint_count", &endpoint_count);
    context.insert("groups", &groups);

    let info = document.get("info");
    let title = info
        .and_then(|i| i.get("title"))
        .and_then(Value::as_str)
        .unwrap_or(hostname);

    let template = match kind {
        OverviewKind::Overview => {
            let info_line = info.map(|i| {
                let version = i.get("version").and_then(Value::as_str).unwrap_or_default();
                format!("{title} v{version} - {}", server_origin(None, document))
            });
            context.insert("info_line", &info_line);
            context.insert(
                "info_description",
                &info
                    .and_then(|i| i.get("description"))
                    .and_then(Value::as_str),
            );
            "overview.md"
        }
        OverviewKind::Skill => {
            let mut description = format!("{title} API integration.");
            if let Some(doc_description) = info
                .and_then(|i| i.get("description"))
                .and_then(Value::as_str)
            {
                let head: String = doc_description.chars().take(900).collect();
                description.push(' ');
                description.push_str(&head);
            }
            description.push_str(&format!(" Use when working with {hostname}."));
            let description: String = description.replace('\n', " ").chars().take(1024).collect();

            context.insert("skill_name", &slugify_hostname(hostname));
            context.insert("skill_description", &description);
            context.insert("title", title);
            context.insert(
                "source",
                Url::parse(link_base)
                    .ok()
                    .and_then(|u| u.host_str().map(String::from))
                    .unwrap_or_else(|| link_base.to_string())
                    .as_str(),
            );
            "skill.md"
        }
    };

    tera.render(template, &context)
        .map_err(|e| ScoutError::Generation(format!("Template error: {e}")))
}
