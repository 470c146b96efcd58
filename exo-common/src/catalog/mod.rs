//! Exoplanet catalog: typed records, CSV parsing, similarity scoring

pub mod parser;
pub mod record;

pub use parser::parse_catalog;
pub use record::{similarity_score, CelestialRecord, Rejection};
