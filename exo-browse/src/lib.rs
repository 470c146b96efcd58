//! # exo-browse
//!
//! Catalog browsing and rating client for exo-api.
//!
//! [`CatalogController`] holds the browsing state (records, query, rating
//! draft, aggregate stat cache, session) and talks to the service through
//! the [`CatalogSource`] and [`RatingsBackend`] traits. [`ExoApiClient`]
//! implements both over HTTP.

pub mod aggregator;
pub mod backend;
pub mod controller;
pub mod draft;
pub mod error;
pub mod http;
pub mod session;
pub mod submission;

#[cfg(test)]
mod testing;

pub use aggregator::{RatingAggregator, ResolveReport};
pub use backend::{CatalogSource, RatingsBackend};
pub use controller::CatalogController;
pub use draft::{RatingDraft, DEFAULT_DISPLAYED_RATING};
pub use error::{ClientError, Result};
pub use http::ExoApiClient;
pub use session::Session;
pub use submission::{SubmissionCoordinator, SubmitOutcome, SIGN_IN_NOTICE, THANKS_NOTICE};
