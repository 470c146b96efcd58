//! Ratings table queries

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::ratings::{AggregateStat, RatingSubmission, StoredRating};
use crate::Result;

/// Validate and persist one rating, returning the stored row
pub async fn insert_rating(pool: &SqlitePool, submission: &RatingSubmission) -> Result<StoredRating> {
    submission.validate()?;

    let submitted_at = Utc::now();
    let id = sqlx::query(
        "INSERT INTO ratings (planet_name, rating, submitted_at) VALUES (?, ?, ?)",
    )
    .bind(&submission.planet_name)
    .bind(submission.rating)
    .bind(submitted_at)
    .execute(pool)
    .await?
    .last_insert_rowid();

    debug!(
        id,
        planet = %submission.planet_name,
        rating = submission.rating,
        "Stored rating"
    );

    Ok(StoredRating {
        id,
        planet_name: submission.planet_name.clone(),
        rating: submission.rating,
        submitted_at,
    })
}

/// Mean and count of all ratings for `planet_name`; `{0, 0}` when unrated
pub async fn aggregate_for_planet(pool: &SqlitePool, planet_name: &str) -> Result<AggregateStat> {
    let (count, average): (i64, Option<f64>) = sqlx::query_as(
        "SELECT COUNT(*), AVG(rating) FROM ratings WHERE planet_name = ?",
    )
    .bind(planet_name)
    .fetch_one(pool)
    .await?;

    Ok(AggregateStat {
        average: average.unwrap_or(0.0),
        count: count.max(0) as u64,
    })
}
