//! Lazy per-planet aggregate stat cache
//!
//! Each visible planet's `{average, count}` is looked up once and cached by
//! name until the whole cache is cleared (after a submission batch). Failed
//! lookups are not cached and not retried; the planet stays pending until a
//! later resolve call asks for it again.

use std::collections::HashSet;

use exo_common::{AggregateStat, StatCache};
use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::backend::RatingsBackend;

/// Cache of resolved aggregate stats
#[derive(Debug, Clone)]
pub struct RatingAggregator {
    cache: StatCache,
    max_in_flight: usize,
}

/// Counts from one resolve call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Lookups issued (names not already cached)
    pub dispatched: usize,
    /// Lookups that succeeded and were cached
    pub resolved: usize,
}

impl RatingAggregator {
    /// `max_in_flight` bounds concurrent lookups (minimum 1)
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            cache: StatCache::new(),
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn get(&self, planet_name: &str) -> Option<&AggregateStat> {
        self.cache.get(planet_name)
    }

    pub fn cache(&self) -> &StatCache {
        &self.cache
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached stat so the next resolve refetches all visible planets
    pub fn clear(&mut self) {
        debug!(entries = self.cache.len(), "Clearing aggregate stat cache");
        self.cache.clear();
    }

    /// Look up every name not already cached, concurrently
    ///
    /// Duplicate names in `names` are dispatched once. Failures are logged
    /// and leave the name unresolved.
    pub async fn resolve<B>(&mut self, names: &[String], backend: &B) -> ResolveReport
    where
        B: RatingsBackend + ?Sized,
    {
        let mut seen = HashSet::new();
        let pending: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| !self.cache.contains_key(*name) && seen.insert(*name))
            .collect();

        if pending.is_empty() {
            return ResolveReport::default();
        }

        let dispatched = pending.len();
        debug!(dispatched, "Resolving aggregate stats");

        let results: Vec<_> = stream::iter(pending)
            .map(|name| async move { (name, backend.fetch_stat(name).await) })
            .buffer_unordered(self.max_in_flight)
            .collect()
            .await;

        let mut resolved = 0;
        for (name, result) in results {
            match result {
                Ok(stat) => {
                    self.cache.insert(name.to_string(), stat);
                    resolved += 1;
                }
                Err(e) => {
                    debug!(planet = %name, error = %e, "Aggregate lookup failed, leaving pending");
                }
            }
        }

        ResolveReport {
            dispatched,
            resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolves_each_name_once() {
        let backend = MockBackend::new();
        backend.set_stat("Earth", 8.0, 4);
        let mut aggregator = RatingAggregator::new(4);

        let report = aggregator.resolve(&names(&["Earth", "Mars"]), &backend).await;
        assert_eq!(report, ResolveReport { dispatched: 2, resolved: 2 });
        assert_eq!(aggregator.get("Earth").unwrap().count, 4);
        assert_eq!(aggregator.get("Mars").unwrap().count, 0);

        // Second pass over an overlapping visible set only fetches the new name
        let report = aggregator.resolve(&names(&["Mars", "Earth", "Venus"]), &backend).await;
        assert_eq!(report.dispatched, 1);
        assert_eq!(backend.lookups("Earth"), 1);
        assert_eq!(backend.lookups("Mars"), 1);
        assert_eq!(backend.lookups("Venus"), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_dispatched_once() {
        let backend = MockBackend::new();
        let mut aggregator = RatingAggregator::new(4);

        aggregator.resolve(&names(&["Earth", "Earth"]), &backend).await;
        assert_eq!(backend.lookups("Earth"), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_name_unresolved() {
        let backend = MockBackend::new();
        backend.fail_lookups_for("Broken");
        let mut aggregator = RatingAggregator::new(4);

        let report = aggregator.resolve(&names(&["Broken", "Earth"]), &backend).await;
        assert_eq!(report, ResolveReport { dispatched: 2, resolved: 1 });
        assert!(aggregator.get("Broken").is_none());

        // Not poisoned: a later pass asks again
        aggregator.resolve(&names(&["Broken"]), &backend).await;
        assert_eq!(backend.lookups("Broken"), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let backend = MockBackend::new();
        let mut aggregator = RatingAggregator::new(4);

        aggregator.resolve(&names(&["Earth"]), &backend).await;
        aggregator.clear();
        assert!(aggregator.is_empty());

        aggregator.resolve(&names(&["Earth"]), &backend).await;
        assert_eq!(backend.lookups("Earth"), 2);
    }

    #[tokio::test]
    async fn test_in_flight_window_is_bounded() {
        let backend = MockBackend::new();
        let mut aggregator = RatingAggregator::new(2);

        let many: Vec<String> = (0..12).map(|i| format!("planet-{}", i)).collect();
        let report = aggregator.resolve(&many, &backend).await;

        assert_eq!(report.resolved, 12);
        assert!(backend.peak_in_flight() <= 2, "peak {}", backend.peak_in_flight());
    }
}
