//! Catalog proxy

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::ApiError;
use crate::AppState;

/// GET /api/exoplanets
///
/// Relays the upstream CSV unchanged. Any upstream failure becomes a 500
/// with a JSON error body; the client then shows an empty catalog.
pub async fn get_exoplanets(State(state): State<AppState>) -> Result<Response, ApiError> {
    let csv = state.catalog.fetch_csv().await.map_err(|e| {
        error!(url = %state.catalog.url(), error = %e, "Catalog fetch failed");
        ApiError::Upstream
    })?;

    Ok(([(CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}
