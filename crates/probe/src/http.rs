//! Blocking HTTP adapter backing the fetch and converter capabilities

use openapi_scout_common::{
    FetchedText, RemoteFetch, Result, ScoutError, SwaggerConverter,
};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Per-request budget for probing and document fetches
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The conversion service gets a tighter budget; a hung converter must not
/// stall the whole pipeline
const CONVERT_TIMEOUT: Duration = Duration::from_secs(10);

const CONVERTER_ENDPOINT: &str = "https://converter.swagger.io/api/convert";

/// Shared blocking client for all outbound requests
pub struct HttpClient {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ScoutError::Upstream(format!("failed to build HTTP client: {e}")))?;
        Ok(HttpClient {
            client,
            user_agent: format!("openapi-scout/{}", env!("CARGO_PKG_VERSION")),
        })
    }
}

impl RemoteFetch for HttpClient {
    fn fetch_text(&self, url: &str) -> Result<FetchedText> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .map_err(|e| ScoutError::Upstream(format!("GET {url}: {e}")))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .map_err(|e| ScoutError::Upstream(format!("reading body of {url}: {e}")))?;

        Ok(FetchedText {
            status,
            body,
            content_type,
        })
    }

    fn fetch_json(&self, url: &str, headers: &[(String, String)]) -> Result<Value> {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let response = request
            .send()
            .map_err(|e| ScoutError::Upstream(format!("GET {url}: {e}")))?;
        if !response.status().is_success() {
            return Err(ScoutError::Upstream(format!(
                "GET {url}: status {}",
                response.status()
            )));
        }
        response
            .json()
            .map_err(|e| ScoutError::Upstream(format!("decoding body of {url}: {e}")))
    }
}

impl SwaggerConverter for HttpClient {
    fn convert(&self, swagger_url: &str) -> Result<Value> {
        let mut endpoint = Url::parse(CONVERTER_ENDPOINT)
            .map_err(|e| ScoutError::Upstream(format!("converter endpoint: {e}")))?;
        endpoint.query_pairs_mut().append_pair("url", swagger_url);

        let response = self
            .client
            .get(endpoint)
            .header("User-Agent", &self.user_agent)
            .timeout(CONVERT_TIMEOUT)
            .send()
            .map_err(|e| ScoutError::ConversionFailure(format!("converter request: {e}")))?;
        if !response.status().is_success() {
            return Err(ScoutError::ConversionFailure(format!(
                "converter returned status {}",
                response.status()
            )));
        }
        response
            .json()
            .map_err(|e| ScoutError::ConversionFailure(format!("converter response: {e}")))
    }
}
