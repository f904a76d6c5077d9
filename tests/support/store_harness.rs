#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use beer_reviews::models::{NewReview, Review};
use beer_reviews::storage::{InMemoryReviewStore, ReviewStore, SqliteReviewStore};

/// A store under test plus whatever keeps it alive.
pub struct StoreFixture {
    pub backend: &'static str,
    pub store: Arc<dyn ReviewStore>,
    _dir: Option<TempDir>,
}

pub async fn sqlite_store_from_path(path: &Path) -> SqliteReviewStore {
    SqliteReviewStore::open(path.to_path_buf())
        .await
        .expect("sqlite review store should open")
}

pub async fn sqlite_fixture() -> (TempDir, SqliteReviewStore) {
    let tmp = TempDir::new().expect("temp dir should be created");
    let store = sqlite_store_from_path(&tmp.path().join("reviews.db")).await;
    (tmp, store)
}

pub fn memory_fixture() -> InMemoryReviewStore {
    InMemoryReviewStore::new()
}

/// Every backend, freshly created and empty.
pub async fn all_backends() -> Vec<StoreFixture> {
    let (tmp, sqlite) = sqlite_fixture().await;
    vec![
        StoreFixture {
            backend: "memory",
            store: Arc::new(memory_fixture()),
            _dir: None,
        },
        StoreFixture {
            backend: "sqlite",
            store: Arc::new(sqlite),
            _dir: Some(tmp),
        },
    ]
}

pub async fn add_unrated(
    store: &dyn ReviewStore,
    content: &str,
    user_id: i64,
    beer_id: i64,
) -> Review {
    store
        .add_review(NewReview::unrated(content, user_id, beer_id))
        .await
        .expect("review should be added")
}

pub async fn add_rated(
    store: &dyn ReviewStore,
    content: &str,
    user_id: i64,
    beer_id: i64,
    rating: i64,
) -> Review {
    store
        .add_review(NewReview::unrated(content, user_id, beer_id).with_rating(rating))
        .await
        .expect("rated review should be added")
}

pub fn ids(reviews: &[Review]) -> Vec<i64> {
    let mut ids: Vec<i64> = reviews.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    ids
}
