//! Catalog browsing state
//!
//! [`CatalogController`] owns everything a browsing session needs: the
//! parsed record set, the current query, the rating draft, the aggregate
//! stat cache and the session. It is driven through `&mut self` methods, so
//! none of that state is shared or locked.

use exo_common::{apply_query, parse_catalog, AggregateStat, CatalogQuery, CelestialRecord, QueryResult};
use tracing::{info, warn};

use crate::aggregator::{RatingAggregator, ResolveReport};
use crate::backend::{CatalogSource, RatingsBackend};
use crate::draft::RatingDraft;
use crate::error::Result;
use crate::session::Session;
use crate::submission::{SubmissionCoordinator, SubmitOutcome};

pub struct CatalogController<B> {
    backend: B,
    records: Vec<CelestialRecord>,
    query: CatalogQuery,
    draft: RatingDraft,
    aggregator: RatingAggregator,
    coordinator: SubmissionCoordinator,
    session: Option<Session>,
}

impl<B> CatalogController<B>
where
    B: CatalogSource + RatingsBackend,
{
    /// Empty controller with default query parameters and no session
    pub fn new(backend: B, max_in_flight: usize) -> Self {
        Self {
            backend,
            records: Vec::new(),
            query: CatalogQuery::default(),
            draft: RatingDraft::new(),
            aggregator: RatingAggregator::new(max_in_flight),
            coordinator: SubmissionCoordinator::new(max_in_flight),
            session: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch and parse the catalog, replacing the current record set
    ///
    /// On failure the record set is left empty and the error returned.
    /// Returns the number of accepted records.
    pub async fn load_catalog(&mut self) -> Result<usize> {
        self.records.clear();

        let text = match self.backend.fetch_catalog().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                return Err(e);
            }
        };

        self.records = parse_catalog(&text);
        info!(records = self.records.len(), "Catalog loaded");
        Ok(self.records.len())
    }

    pub fn records(&self) -> &[CelestialRecord] {
        &self.records
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut CatalogQuery {
        &mut self.query
    }

    pub fn set_query(&mut self, query: CatalogQuery) {
        self.query = query;
    }

    /// Visible records under the current query and cached stats
    pub fn visible(&self) -> QueryResult<'_> {
        apply_query(&self.records, &self.query, self.aggregator.cache())
    }

    /// Resolve aggregate stats for every visible record not yet cached
    pub async fn resolve_visible_stats(&mut self) -> ResolveReport {
        let names = self.visible().names();
        self.aggregator.resolve(&names, &self.backend).await
    }

    /// Cached aggregate stat, `None` while pending
    pub fn stat(&self, planet_name: &str) -> Option<&AggregateStat> {
        self.aggregator.get(planet_name)
    }

    /// Record a draft rating; values outside `[0, 10]` are rejected
    pub fn set_rating(&mut self, planet_name: &str, rating: i64) -> Result<()> {
        self.draft.set(planet_name, rating)
    }

    /// Draft rating for `planet_name`, or the default of 5
    pub fn displayed_rating(&self, planet_name: &str) -> u8 {
        self.draft.displayed(planet_name)
    }

    pub fn draft(&self) -> &RatingDraft {
        &self.draft
    }

    /// Record that the auth provider reported a signed-in identity
    pub fn sign_in(&mut self, session: Session) {
        info!(session = %session.label(), "Signed in");
        self.session = Some(session);
    }

    /// Record that the auth provider ended the session
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!(session = %session.label(), "Signed out");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Submit the draft through the coordinator
    pub async fn submit_ratings(&mut self) -> SubmitOutcome {
        self.coordinator
            .submit(
                self.session.as_ref(),
                &self.draft,
                &mut self.aggregator,
                &self.backend,
            )
            .await
    }
}
