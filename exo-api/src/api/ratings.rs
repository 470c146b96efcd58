//! Rating submission and aggregate lookup

use axum::{
    extract::{Path, State},
    Json,
};
use exo_common::db::{aggregate_for_planet, insert_rating};
use exo_common::{AggregateStat, RatingSubmission, StoredRating};
use tracing::{info, warn};

use super::ApiError;
use crate::AppState;

/// GET /api/ratings/:planet
///
/// Mean and count over every stored rating for the planet. Unknown planets
/// report `{ "average": 0, "count": 0 }`.
pub async fn get_planet_stats(
    State(state): State<AppState>,
    Path(planet): Path<String>,
) -> Result<Json<AggregateStat>, ApiError> {
    let stat = aggregate_for_planet(&state.db, &planet).await?;
    Ok(Json(stat))
}

/// POST /api/ratings
///
/// Stores one rating and returns the inserted row.
pub async fn submit_rating(
    State(state): State<AppState>,
    Json(submission): Json<RatingSubmission>,
) -> Result<Json<StoredRating>, ApiError> {
    let stored = insert_rating(&state.db, &submission).await.map_err(|e| {
        warn!(planet = %submission.planet_name, rating = submission.rating, error = %e, "Rating rejected");
        ApiError::from(e)
    })?;

    info!(id = stored.id, planet = %stored.planet_name, rating = stored.rating, "Rating stored");

    Ok(Json(stored))
}
