//! HTTP API handlers for exo-api

pub mod catalog;
pub mod error;
pub mod health;
pub mod ratings;

pub use catalog::get_exoplanets;
pub use error::ApiError;
pub use health::health_routes;
pub use ratings::{get_planet_stats, submit_rating};
