//! Candidate locations checked during discovery, in probe order

/// Paths tried against a hostname, most common first
///
/// Order matters: the first validating body wins and gets cached, so the
/// conventional root locations come before the long tail of variants.
pub const CANDIDATE_PATHS: [&str; 39] = [
    // Root paths
    "/openapi.json",
    "/openapi.yaml",
    "/openapi.yml",
    // Well-known paths
    "/.well-known/openapi.json",
    "/.well-known/openapi.yaml",
    "/.well-known/openapi.yml",
    "/.well-known/api-description.json",
    "/.well-known/api-description.yaml",
    "/.well-known/api-description.yml",
    // API paths
    "/api/openapi.json",
    "/api/openapi.yaml",
    "/api/openapi.yml",
    "/api/v1/openapi.json",
    "/api/v1/openapi.yaml",
    "/api/v1/openapi.yml",
    // Documentation paths
    "/docs/openapi.json",
    "/docs/openapi.yaml",
    "/docs/openapi.yml",
    "/api-docs/openapi.json",
    "/api-docs/openapi.yaml",
    "/api-docs/openapi.yml",
    "/swagger/openapi.json",
    "/swagger/openapi.yaml",
    "/swagger/openapi.yml",
    // Version-specific paths
    "/v3/openapi.json",
    "/v3/openapi.yaml",
    "/v3/openapi.yml",
    "/v2/openapi.json",
    "/v2/openapi.yaml",
    "/v2/openapi.yml",
    "/v1/openapi.json",
    "/v1/openapi.yaml",
    "/v1/openapi.yml",
    // Common naming variations
    "/swagger.json",
    "/swagger.yaml",
    "/swagger.yml",
    "/api-specification.json",
    "/api-specification.yaml",
    "/api-specification.yml",
];
