//! exo-api library - catalog proxy and ratings service
//!
//! Routes:
//! - `GET  /api/exoplanets`         upstream CSV catalog, relayed as text/csv
//! - `GET  /api/ratings/:planet`    `{ average, count }` for one planet
//! - `POST /api/ratings`            store `{ planet_name, rating }`
//! - `GET  /health`                 liveness

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod upstream;

use upstream::UpstreamCatalog;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Ratings database pool
    pub db: SqlitePool,
    /// Upstream catalog client
    pub catalog: Arc<UpstreamCatalog>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog: UpstreamCatalog) -> Self {
        Self {
            db,
            catalog: Arc::new(catalog),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/api/exoplanets", get(api::get_exoplanets))
        .route("/api/ratings", post(api::submit_rating))
        .route("/api/ratings/:planet", get(api::get_planet_stats));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
