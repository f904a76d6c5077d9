use super::prompt::{build_prompt, parse_rating};
use super::RATER_COMPONENT;
use crate::config::RaterConfig;
use crate::diagnostics::HealthRegistry;
use crate::error::StoreError;
use crate::models::Review;
use crate::rating::RatingClient;
use crate::storage::ReviewStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Unrated reviews returned by the poll
    pub found: usize,
    /// Reviews that received a rating and were persisted
    pub rated: usize,
    /// Reviews left unrated; they are picked up again by a later poll
    pub skipped: usize,
}

impl CycleReport {
    pub fn is_idle(&self) -> bool {
        self.found == 0
    }
}

enum Outcome {
    Rated,
    Skipped,
    Cancelled,
}

/// Polls the store for unrated reviews and rates them one at a time.
pub struct ReviewRater {
    store: Arc<dyn ReviewStore>,
    client: Arc<dyn RatingClient>,
    health: Arc<HealthRegistry>,
    model: String,
    idle_wait: Duration,
    error_backoff: Duration,
}

impl ReviewRater {
    pub fn new(
        store: Arc<dyn ReviewStore>,
        client: Arc<dyn RatingClient>,
        health: Arc<HealthRegistry>,
        config: &RaterConfig,
    ) -> Self {
        Self {
            store,
            client,
            health,
            model: config.model.clone(),
            idle_wait: config.idle_wait(),
            error_backoff: config.error_backoff(),
        }
    }

    /// Run one poll cycle to completion.
    ///
    /// Only a failed poll is an error. Per-review failures are logged and
    /// counted in [`CycleReport::skipped`].
    pub async fn run_cycle(&self) -> Result<CycleReport, StoreError> {
        self.cycle(&CancellationToken::new()).await
    }

    /// Poll until `shutdown` fires.
    ///
    /// Waiting (idle or after a failed poll) and a pending model call both
    /// end early on shutdown. A store update that has begun is always let
    /// finish.
    pub async fn run(&self, shutdown: CancellationToken) {
        self.health.mark_starting(RATER_COMPONENT);
        tracing::info!(
            model = %self.model,
            client = self.client.name(),
            store = self.store.name(),
            "review rater started"
        );

        while !shutdown.is_cancelled() {
            let pause = match self.cycle(&shutdown).await {
                Ok(report) if report.is_idle() => Some(self.idle_wait),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to list unrated reviews");
                    Some(self.error_backoff)
                }
            };

            if let Some(pause) = pause {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    () = tokio::time::sleep(pause) => {}
                }
            }
        }

        self.health.mark_stopped(RATER_COMPONENT);
        tracing::info!("review rater stopped");
    }

    async fn cycle(&self, shutdown: &CancellationToken) -> Result<CycleReport, StoreError> {
        let batch = match self.store.list_unrated_reviews().await {
            Ok(batch) => batch,
            Err(e) => {
                self.health.mark_error(RATER_COMPONENT, &e);
                return Err(e);
            }
        };

        let mut report = CycleReport {
            found: batch.len(),
            ..CycleReport::default()
        };
        if report.found > 0 {
            tracing::debug!(found = report.found, "rating unrated reviews");
        }

        for review in batch {
            match self.rate_one(review, shutdown).await {
                Outcome::Rated => report.rated += 1,
                Outcome::Skipped => report.skipped += 1,
                Outcome::Cancelled => break,
            }
        }

        if report.found > 0 && report.rated == 0 && report.skipped > 0 {
            self.health.mark_error(
                RATER_COMPONENT,
                format!("all {} reviews in the last batch were skipped", report.skipped),
            );
        } else {
            self.health.mark_ok(RATER_COMPONENT);
        }

        Ok(report)
    }

    async fn rate_one(&self, mut review: Review, shutdown: &CancellationToken) -> Outcome {
        if shutdown.is_cancelled() {
            return Outcome::Cancelled;
        }

        let prompt = build_prompt(&review.content);
        let reply = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Outcome::Cancelled,
            reply = self.client.query(&self.model, &prompt) => reply,
        };

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(review_id = review.id, error = %e, "rating request failed");
                return Outcome::Skipped;
            }
        };

        let rating = match parse_rating(&reply) {
            Ok(rating) => rating,
            Err(e) => {
                tracing::warn!(review_id = review.id, error = %e, "unusable rating reply");
                return Outcome::Skipped;
            }
        };

        review.rating = Some(rating);
        match self.store.update_review(&review).await {
            Ok(()) => {
                tracing::info!(review_id = review.id, rating = %rating, "review rated");
                Outcome::Rated
            }
            Err(e) => {
                tracing::warn!(review_id = review.id, error = %e, "failed to save rating");
                Outcome::Skipped
            }
        }
    }
}
