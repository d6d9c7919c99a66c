//! Derived artifact generation
//!
//! This crate renders a processed document into consumer-facing artifacts:
//! a tag-grouped overview (or agent skill file), a typed TypeScript call
//! stub for one operation, and a full markdown API reference. All inputs
//! are expected to be dereferenced; nothing here touches the network.

mod overview;
mod summary;
mod templates;
mod typescript;

pub use overview::{generate_overview, OverviewKind};
pub use summary::generate_api_docs;
pub use typescript::{generate_request_stub, schema_to_ts};
