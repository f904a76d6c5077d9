mod repository;
mod schema;

use super::traits::ReviewStore;
use crate::error::StoreError;
use crate::models::{NewReview, Review};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::PathBuf;
use std::time::Duration;

pub use schema::REVIEW_SCHEMA_VERSION;

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT_SECS: u64 = 5;

/// SQLite-backed review store.
///
/// Each operation is one statement on a pooled connection; SQLite's own
/// locking (WAL mode plus a busy timeout) serializes writers from the API and
/// the rater, including when they live in separate processes.
pub struct SqliteReviewStore {
    pool: SqlitePool,
}

impl SqliteReviewStore {
    /// Open (or create) the database file and bring its schema up to date.
    pub async fn open(db_path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create database directory")?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .with_context(|| format!("open SQLite database {}", db_path.display()))?;

        schema::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Pinned to one connection: every `:memory:` connection is its own
    /// database.
    #[cfg(test)]
    async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("open in-memory SQLite")?;
        schema::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn schema_version(&self) -> anyhow::Result<i64> {
        schema::current_version(&self.pool).await
    }
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> bool {
        repository::health_check(&self.pool).await
    }

    async fn add_review(&self, review: NewReview) -> Result<Review, StoreError> {
        repository::insert_review(&self.pool, review).await
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        repository::list_all(&self.pool).await
    }

    async fn list_reviews_by_beer_id(&self, beer_id: i64) -> Result<Vec<Review>, StoreError> {
        repository::list_by_beer(&self.pool, beer_id).await
    }

    async fn list_reviews_by_user_id(&self, user_id: i64) -> Result<Vec<Review>, StoreError> {
        repository::list_by_user(&self.pool, user_id).await
    }

    async fn list_unrated_reviews(&self) -> Result<Vec<Review>, StoreError> {
        repository::list_unrated(&self.pool).await
    }

    async fn update_review(&self, review: &Review) -> Result<(), StoreError> {
        repository::update_review(&self.pool, review).await
    }

    async fn average_rating(&self, beer_id: i64) -> Result<Option<f64>, StoreError> {
        repository::average_rating(&self.pool, beer_id).await
    }
}
