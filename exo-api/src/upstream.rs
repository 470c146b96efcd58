//! Upstream exoplanet archive client
//!
//! Issues the single outbound catalog request and returns the raw CSV text.
//! Parsing happens on the client; this side only relays.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("exorate/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Upstream fetch errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),
}

/// Client for the CSV catalog endpoint
pub struct UpstreamCatalog {
    http_client: reqwest::Client,
    url: String,
}

impl UpstreamCatalog {
    pub fn new(url: impl Into<String>) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the catalog CSV text
    pub async fn fetch_csv(&self) -> Result<String, UpstreamError> {
        debug!(url = %self.url, "Fetching exoplanet catalog");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        info!(bytes = body.len(), "Fetched exoplanet catalog");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let catalog = UpstreamCatalog::new("http://127.0.0.1:9/catalog.csv");
        assert!(catalog.is_ok());
        assert_eq!(catalog.unwrap().url(), "http://127.0.0.1:9/catalog.csv");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        // Port 9 (discard) is not listening on loopback in test environments
        let catalog = UpstreamCatalog::new("http://127.0.0.1:9/catalog.csv").unwrap();
        let result = catalog.fetch_csv().await;
        assert!(matches!(result, Err(UpstreamError::Network(_))));
    }
}
