//! API error responses
//!
//! Every failure is reported as `{"error": "<message>"}` with a matching
//! status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream catalog fetch failed
    #[error("Failed to fetch exoplanet data")]
    Upstream,

    /// Request failed numeric/field sanity checks
    #[error("{0}")]
    InvalidInput(String),

    /// Ratings store failure
    #[error("{0}")]
    Database(String),
}

impl From<exo_common::Error> for ApiError {
    fn from(err: exo_common::Error) -> Self {
        match err {
            exo_common::Error::InvalidInput(msg) => ApiError::InvalidInput(msg),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
