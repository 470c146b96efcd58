//! # Exorate Common Library
//!
//! Shared code for the Exorate ratings service and browser client:
//! - Catalog records, CSV parsing and Earth Similarity Index scoring
//! - Filter/sort/paginate engine over the parsed catalog
//! - Rating request/response types
//! - Configuration loading
//! - SQLite ratings store

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod ratings;

pub use catalog::{parse_catalog, similarity_score, CelestialRecord};
pub use error::{Error, Result};
pub use query::{apply_query, CatalogQuery, QueryResult, SortField};
pub use ratings::{AggregateStat, RatingSubmission, StatCache, StoredRating};
