//! Fetching the source OpenAPI document

use log::{debug, info};
use std::time::Duration;
use url::Url;

use crate::error::{SliceError, SliceResult};
use crate::models::SourceDocument;

/// Swagger JSON endpoint of a backend running locally
pub const DEFAULT_URL: &str = "http://localhost:3000/swagger-json";

/// Issues a single GET for the source document. No retries.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    url: Url,
    timeout: Option<Duration>,
}

impl DocumentFetcher {
    /// Validates the URL up front so a typo fails before any network call
    pub fn new(url: &str, timeout: Option<Duration>) -> SliceResult<Self> {
        let url = Url::parse(url).map_err(|e| SliceError::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(Self { url, timeout })
    }

    pub async fn fetch(&self) -> SliceResult<SourceDocument> {
        info!("Fetching OpenAPI document from {}", self.url);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SliceError::FetchError(e.to_string()))?;

        let response = client
            .get(self.url.clone())
            .header("Accept", "application/json, application/yaml")
            .send()
            .await
            .map_err(|e| SliceError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SliceError::FetchError(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let body = response
            .text()
            .await
            .map_err(|e| SliceError::FetchError(e.to_string()))?;
        debug!("Received {} bytes ({})", body.len(), content_type);

        let path = self.url.path();
        let is_yaml = content_type.contains("yaml") || path.ends_with(".yaml") || path.ends_with(".yml");
        parse_document(&body, is_yaml)
    }
}

/// Decode a document body as JSON, or YAML when the server says so
pub fn parse_document(body: &str, is_yaml: bool) -> SliceResult<SourceDocument> {
    if is_yaml {
        serde_yaml::from_str(body).map_err(|e| SliceError::InvalidFormat(e.to_string()))
    } else {
        serde_json::from_str(body).map_err(|e| SliceError::InvalidFormat(e.to_string()))
    }
}
