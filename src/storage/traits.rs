use crate::error::StoreError;
use crate::models::{NewReview, Review};
use async_trait::async_trait;

/// Capability contract over durable review storage.
///
/// The store is the only synchronization point between the API and the rater:
/// `list_unrated_reviews` followed later by `update_review` must interleave
/// safely with concurrent `add_review` calls.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Health check
    async fn health_check(&self) -> bool;

    /// Persist a new review and return it with its assigned id.
    ///
    /// Blank content or a present rating outside `1..=5` is rejected with
    /// [`StoreError::Validation`].
    async fn add_review(&self, review: NewReview) -> Result<Review, StoreError>;

    /// Snapshot of every review. Ordering is by id for both backends.
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError>;

    /// Reviews for one beer; empty when there are none.
    async fn list_reviews_by_beer_id(&self, beer_id: i64) -> Result<Vec<Review>, StoreError>;

    /// Reviews by one author; empty when there are none.
    async fn list_reviews_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, StoreError>;

    /// Reviews whose rating is still null. The rater polls this.
    async fn list_unrated_reviews(&self) -> Result<Vec<Review>, StoreError>;

    /// Replace the stored row with the same id.
    ///
    /// Fails with [`StoreError::NotFound`] when no such id exists; no other
    /// row is touched in that case.
    async fn update_review(&self, review: &Review) -> Result<(), StoreError>;

    /// Mean rating over the beer's rated reviews.
    ///
    /// Returns `Ok(None)` when the beer has no rated reviews: the average is
    /// undefined there, and callers must not read it as zero.
    async fn average_rating(&self, beer_id: i64) -> Result<Option<f64>, StoreError>;
}
