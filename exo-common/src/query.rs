//! Filter/sort/paginate engine over the parsed catalog
//!
//! Pure functions of `(records, query, stats)`; the caller owns all state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CelestialRecord;
use crate::ratings::StatCache;
use crate::Error;

/// Default number of records shown
pub const DEFAULT_DISPLAY_COUNT: usize = 10;

/// Default upper radius bound (Earth radii)
pub const DEFAULT_MAX_RADIUS: f64 = 10.0;

/// Sort order for the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    /// Similarity score, highest first
    #[default]
    SimilarityScore,
    /// Radius, smallest first
    Radius,
    /// Equilibrium temperature, coldest first
    Temperature,
    /// Cached average rating, highest first (unresolved counts as 0)
    AverageRating,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::SimilarityScore => "esi",
            SortField::Radius => "radius",
            SortField::Temperature => "temperature",
            SortField::AverageRating => "avg-rating",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esi" | "similarity" | "similarity-score" => Ok(SortField::SimilarityScore),
            "radius" => Ok(SortField::Radius),
            "temperature" | "temp" => Ok(SortField::Temperature),
            "avg-rating" | "avgrating" | "rating" | "average-rating" => {
                Ok(SortField::AverageRating)
            }
            other => Err(Error::InvalidInput(format!(
                "unknown sort field '{}' (expected esi, radius, temperature or avg-rating)",
                other
            ))),
        }
    }
}

/// User-controlled view parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against the planet name
    pub search: String,
    /// Inclusive lower radius bound (Earth radii)
    pub min_radius: f64,
    /// Inclusive upper radius bound (Earth radii)
    pub max_radius: f64,
    /// Minimum similarity score
    pub min_score: f64,
    pub sort: SortField,
    /// Requested number of visible records, clamped to `[1, max(filtered, 1)]`
    pub display_count: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_radius: 0.0,
            max_radius: DEFAULT_MAX_RADIUS,
            min_score: 0.0,
            sort: SortField::default(),
            display_count: DEFAULT_DISPLAY_COUNT,
        }
    }
}

/// Visible subset plus the size of the filtered set it was cut from
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    pub records: Vec<&'a CelestialRecord>,
    pub filtered_count: usize,
}

impl<'a> QueryResult<'a> {
    /// Names of the visible records, in display order
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name().to_string()).collect()
    }
}

/// Filter, sort and truncate `records` according to `query`
///
/// A record is kept iff its name contains `query.search` (case-insensitive),
/// its radius lies in `[min_radius, max_radius]` and its score is at least
/// `min_score`. Sorting is stable, so ties keep input order.
pub fn apply_query<'a>(
    records: &'a [CelestialRecord],
    query: &CatalogQuery,
    stats: &StatCache,
) -> QueryResult<'a> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<&CelestialRecord> = records
        .iter()
        .filter(|record| matches(record, query, &needle))
        .collect();

    let filtered_count = visible.len();

    match query.sort {
        SortField::SimilarityScore => {
            visible.sort_by(|a, b| b.similarity_score().total_cmp(&a.similarity_score()))
        }
        SortField::Radius => visible.sort_by(|a, b| a.radius().total_cmp(&b.radius())),
        SortField::Temperature => {
            visible.sort_by(|a, b| a.equilibrium_temp().total_cmp(&b.equilibrium_temp()))
        }
        SortField::AverageRating => visible.sort_by(|a, b| {
            average_or_zero(stats, b.name()).total_cmp(&average_or_zero(stats, a.name()))
        }),
    }

    visible.truncate(display_limit(query.display_count, filtered_count));

    QueryResult {
        records: visible,
        filtered_count,
    }
}

/// Clamp the requested display count to `[1, max(filtered_count, 1)]`
pub fn display_limit(requested: usize, filtered_count: usize) -> usize {
    requested.clamp(1, filtered_count.max(1))
}

fn matches(record: &CelestialRecord, query: &CatalogQuery, needle: &str) -> bool {
    record.name().to_lowercase().contains(needle)
        && record.radius() >= query.min_radius
        && record.radius() <= query.max_radius
        && record.similarity_score() >= query.min_score
}

fn average_or_zero(stats: &StatCache, name: &str) -> f64 {
    stats.get(name).map(|stat| stat.average).unwrap_or(0.0)
}
