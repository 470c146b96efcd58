//! Rating request/response types shared by exo-api and exo-browse

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lowest accepted habitability rating
pub const MIN_RATING: i64 = 0;

/// Highest accepted habitability rating
pub const MAX_RATING: i64 = 10;

/// Mean and count of all ratings submitted for one planet
///
/// A planet nobody has rated yet reports `{ average: 0, count: 0 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    pub average: f64,
    pub count: u64,
}

/// Resolved aggregate stats keyed by planet name
pub type StatCache = HashMap<String, AggregateStat>;

/// POST /api/ratings request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSubmission {
    pub planet_name: String,
    pub rating: i64,
}

impl RatingSubmission {
    pub fn new(planet_name: impl Into<String>, rating: i64) -> Self {
        Self {
            planet_name: planet_name.into(),
            rating,
        }
    }

    /// Numeric sanity checks applied before a rating is persisted
    pub fn validate(&self) -> Result<()> {
        if self.planet_name.trim().is_empty() {
            return Err(Error::InvalidInput("planet_name must not be empty".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, self.rating
            )));
        }
        Ok(())
    }
}

/// One persisted rating row, returned by POST /api/ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRating {
    pub id: i64,
    pub planet_name: String,
    pub rating: i64,
    pub submitted_at: DateTime<Utc>,
}
