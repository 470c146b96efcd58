//! In-memory backend for unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use exo_common::{AggregateStat, RatingSubmission, StoredRating};

use crate::backend::{CatalogSource, RatingsBackend};
use crate::error::{ClientError, Result};

#[derive(Default)]
pub struct MockBackend {
    catalog: Mutex<Option<String>>,
    stats: Mutex<HashMap<String, AggregateStat>>,
    lookups: Mutex<HashMap<String, usize>>,
    failing_lookups: Mutex<HashSet<String>>,
    failing_submissions: Mutex<HashSet<String>>,
    submitted: Mutex<Vec<RatingSubmission>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(csv: &str) -> Self {
        let backend = Self::default();
        *backend.catalog.lock().unwrap() = Some(csv.to_string());
        backend
    }

    /// `None` makes the next catalog fetch fail
    pub fn catalog_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.catalog.lock().unwrap()
    }

    pub fn set_stat(&self, name: &str, average: f64, count: u64) {
        self.stats
            .lock()
            .unwrap()
            .insert(name.to_string(), AggregateStat { average, count });
    }

    pub fn fail_lookups_for(&self, name: &str) {
        self.failing_lookups.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_submissions_for(&self, name: &str) {
        self.failing_submissions.lock().unwrap().insert(name.to_string());
    }

    pub fn lookups(&self, name: &str) -> usize {
        self.lookups.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total_lookups(&self) -> usize {
        self.lookups.lock().unwrap().values().sum()
    }

    pub fn submission_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn submitted(&self) -> Vec<RatingSubmission> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        // let sibling futures in the window make progress
        tokio::task::yield_now().await;
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogSource for MockBackend {
    async fn fetch_catalog(&self) -> Result<String> {
        self.catalog
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Api(500, "Failed to fetch exoplanet data".to_string()))
    }
}

#[async_trait]
impl RatingsBackend for MockBackend {
    async fn fetch_stat(&self, planet_name: &str) -> Result<AggregateStat> {
        self.enter().await;
        *self
            .lookups
            .lock()
            .unwrap()
            .entry(planet_name.to_string())
            .or_default() += 1;

        let failing = self.failing_lookups.lock().unwrap().contains(planet_name);
        let stat = self.stats.lock().unwrap().get(planet_name).copied();
        self.leave();

        if failing {
            return Err(ClientError::Network("connection reset".to_string()));
        }
        Ok(stat.unwrap_or_default())
    }

    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<StoredRating> {
        self.enter().await;
        let failing = self
            .failing_submissions
            .lock()
            .unwrap()
            .contains(&submission.planet_name);
        let id = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(submission.clone());
            submitted.len() as i64
        };
        self.leave();

        if failing {
            return Err(ClientError::Api(500, "database unavailable".to_string()));
        }
        Ok(StoredRating {
            id,
            planet_name: submission.planet_name.clone(),
            rating: submission.rating,
            submitted_at: Utc::now(),
        })
    }
}
