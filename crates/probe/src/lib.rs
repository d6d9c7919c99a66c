//! Spec discovery for a bare hostname
//!
//! Given `api.example.com`, this crate probes a fixed list of well-known
//! locations until one returns a body that validates as an OpenAPI or
//! Swagger document, then hands back the exact original text together with
//! the URL it was found at. Hits are cached for 30 days and revalidated on
//! every use.

mod http;
mod paths;
mod probe;
mod validate;

pub use http::HttpClient;
pub use paths::CANDIDATE_PATHS;
pub use probe::SpecProbe;
pub use validate::validate_spec_body;
