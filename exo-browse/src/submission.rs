//! Rating submission gated on session presence

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::aggregator::RatingAggregator;
use crate::backend::RatingsBackend;
use crate::draft::RatingDraft;
use crate::session::Session;

/// Shown when a submit is attempted without a session
pub const SIGN_IN_NOTICE: &str = "Please sign in before submitting your ratings!";

/// Shown once every submission request has settled
pub const THANKS_NOTICE: &str = "Thanks for rating!";

/// Result of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No session; nothing was sent
    SignInRequired,
    /// Every draft entry was sent and all requests settled
    Completed { attempted: usize, failed: usize },
}

impl SubmitOutcome {
    /// User-facing notice for this outcome
    pub fn notice(&self) -> String {
        match self {
            SubmitOutcome::SignInRequired => SIGN_IN_NOTICE.to_string(),
            SubmitOutcome::Completed { failed: 0, .. } => THANKS_NOTICE.to_string(),
            SubmitOutcome::Completed { attempted, failed } => format!(
                "{} ({} of {} ratings could not be saved)",
                THANKS_NOTICE, failed, attempted
            ),
        }
    }
}

/// Flushes a rating draft to the backend
#[derive(Debug, Clone, Copy)]
pub struct SubmissionCoordinator {
    max_in_flight: usize,
}

impl SubmissionCoordinator {
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Send one request per draft entry and wait for all of them
    ///
    /// Without a session no request is issued. With one, failures are
    /// logged and counted but never short-circuit the batch; once all
    /// requests settle the aggregator cache is cleared. The draft itself is
    /// left as it was.
    pub async fn submit<B>(
        &self,
        session: Option<&Session>,
        draft: &RatingDraft,
        aggregator: &mut RatingAggregator,
        backend: &B,
    ) -> SubmitOutcome
    where
        B: RatingsBackend + ?Sized,
    {
        let Some(session) = session else {
            info!("Submit requested without a session, nothing sent");
            return SubmitOutcome::SignInRequired;
        };

        let submissions = draft.submissions();
        let attempted = submissions.len();
        info!(session = %session.label(), attempted, "Submitting ratings");

        let failed = stream::iter(submissions.iter())
            .map(|submission| async move {
                match backend.submit_rating(submission).await {
                    Ok(_) => false,
                    Err(e) => {
                        warn!(
                            planet = %submission.planet_name,
                            rating = submission.rating,
                            error = %e,
                            "Rating submission failed"
                        );
                        true
                    }
                }
            })
            .buffer_unordered(self.max_in_flight)
            .filter(|failed| futures::future::ready(*failed))
            .count()
            .await;

        aggregator.clear();

        info!(attempted, failed, "Rating submission complete");
        SubmitOutcome::Completed { attempted, failed }
    }
}
