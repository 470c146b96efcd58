//! exo-api HTTP client

use std::time::Duration;

use async_trait::async_trait;
use exo_common::{AggregateStat, RatingSubmission, StoredRating};
use reqwest::{Response, Url};
use tracing::debug;

use crate::backend::{CatalogSource, RatingsBackend};
use crate::error::{ClientError, Result};

const USER_AGENT: &str = concat!("exo-browse/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the exo-api endpoints
#[derive(Clone)]
pub struct ExoApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ExoApiClient {
    /// Create a client for the service at `base_url` (e.g. `http://127.0.0.1:5780`)
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API URL '{}' cannot be used as a base",
                base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended by percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Map non-success statuses to `ClientError::Api` with the response body
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api(status.as_u16(), body))
}

#[async_trait]
impl CatalogSource for ExoApiClient {
    async fn fetch_catalog(&self) -> Result<String> {
        let url = self.endpoint(&["api", "exoplanets"]);
        debug!(url = %url, "Fetching catalog");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))
    }
}

#[async_trait]
impl RatingsBackend for ExoApiClient {
    async fn fetch_stat(&self, planet_name: &str) -> Result<AggregateStat> {
        let url = self.endpoint(&["api", "ratings", planet_name]);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .json::<AggregateStat>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<StoredRating> {
        let url = self.endpoint(&["api", "ratings"]);

        let response = self
            .http_client
            .post(url)
            .json(submission)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .json::<StoredRating>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(ExoApiClient::new("http://127.0.0.1:5780").is_ok());
        assert!(matches!(
            ExoApiClient::new("not a url"),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ExoApiClient::new("mailto:someone@example.com"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_planet_names_are_percent_encoded() {
        let client = ExoApiClient::new("http://127.0.0.1:5780").unwrap();
        let url = client.endpoint(&["api", "ratings", "TOI-700 d/x"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:5780/api/ratings/TOI-700%20d%2Fx");
    }

    #[test]
    fn test_base_path_prefix_kept() {
        let client = ExoApiClient::new("http://example.test/exorate/").unwrap();
        let url = client.endpoint(&["api", "exoplanets"]);
        assert_eq!(url.as_str(), "http://example.test/exorate/api/exoplanets");
    }
}
