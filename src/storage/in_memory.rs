use super::traits::ReviewStore;
use crate::error::StoreError;
use crate::models::{NewReview, Review};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// Process-local review store.
///
/// One mutex guards the rows and the id counter together; every operation is
/// a single short critical section and never awaits while holding it.
pub struct InMemoryReviewStore {
    inner: Mutex<Inner>,
}

struct Inner {
    rows: Vec<Review>,
    next_id: i64,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".into()))
    }

    fn select(&self, keep: impl Fn(&Review) -> bool) -> Result<Vec<Review>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.rows.iter().filter(|r| keep(r)).cloned().collect())
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> bool {
        self.lock().is_ok()
    }

    async fn add_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let rating = review.validate().map_err(StoreError::Validation)?;
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let stored = review.into_review(id, rating);
        inner.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        self.select(|_| true)
    }

    async fn list_reviews_by_beer_id(&self, beer_id: i64) -> Result<Vec<Review>, StoreError> {
        self.select(|r| r.beer_id == beer_id)
    }

    async fn list_reviews_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, StoreError> {
        self.select(|r| r.user_id == user_id)
    }

    async fn list_unrated_reviews(&self) -> Result<Vec<Review>, StoreError> {
        self.select(|r| !r.is_rated())
    }

    async fn update_review(&self, review: &Review) -> Result<(), StoreError> {
        if review.content.trim().is_empty() {
            return Err(StoreError::Validation(
                "review content must not be empty".into(),
            ));
        }
        let mut inner = self.lock()?;
        let slot = inner
            .rows
            .iter_mut()
            .find(|r| r.id == review.id)
            .ok_or(StoreError::NotFound { id: review.id })?;
        slot.clone_from(review);
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    async fn average_rating(&self, beer_id: i64) -> Result<Option<f64>, StoreError> {
        let inner = self.lock()?;
        let (sum, count) = inner
            .rows
            .iter()
            .filter(|r| r.beer_id == beer_id)
            .filter_map(|r| r.rating)
            .fold((0_u64, 0_u64), |(sum, count), rating| {
                (sum + u64::from(rating.get()), count + 1)
            });
        Ok((count > 0).then(|| sum as f64 / count as f64))
    }
}
