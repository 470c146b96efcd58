//! Seams between the client core and exo-api
//!
//! The controller, aggregator and submission coordinator only see these
//! traits; [`crate::http::ExoApiClient`] implements them over HTTP.

use async_trait::async_trait;
use exo_common::{AggregateStat, RatingSubmission, StoredRating};

use crate::error::Result;

/// Source of the raw catalog CSV
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog as delimited text
    async fn fetch_catalog(&self) -> Result<String>;
}

/// Ratings persistence backend
#[async_trait]
pub trait RatingsBackend: Send + Sync {
    /// Aggregate stat for one planet
    async fn fetch_stat(&self, planet_name: &str) -> Result<AggregateStat>;

    /// Persist one rating
    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<StoredRating>;
}
