use crate::error::StoreError;
use crate::models::{NewReview, Rating, Review};
use sqlx::SqlitePool;

type ReviewRow = (i64, String, Option<i64>, i64, i64);

const SELECT_REVIEWS: &str = "SELECT id, content, rating, user_id, beer_id FROM reviews";

fn decode_row((id, content, rating, user_id, beer_id): ReviewRow) -> Result<Review, StoreError> {
    let rating = rating
        .map(Rating::new)
        .transpose()
        .map_err(|e| StoreError::Backend(format!("corrupt review row {id}: {e}")))?;
    Ok(Review {
        id,
        content,
        rating,
        user_id,
        beer_id,
    })
}

async fn fetch_reviews(
    pool: &SqlitePool,
    operation: &str,
    filter: Option<(&str, i64)>,
) -> Result<Vec<Review>, StoreError> {
    let rows: Vec<ReviewRow> = match filter {
        Some((clause, value)) => {
            sqlx::query_as::<_, ReviewRow>(&format!("{SELECT_REVIEWS} WHERE {clause} ORDER BY id"))
                .bind(value)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_as::<_, ReviewRow>(&format!("{SELECT_REVIEWS} ORDER BY id"))
                .fetch_all(pool)
                .await
        }
    }
    .map_err(|e| StoreError::backend(operation, e))?;

    rows.into_iter().map(decode_row).collect()
}

// ── Public repository operations ─────────────────────────────

pub(super) async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}

pub(super) async fn insert_review(
    pool: &SqlitePool,
    review: NewReview,
) -> Result<Review, StoreError> {
    let rating = review.validate().map_err(StoreError::Validation)?;
    let result = sqlx::query(
        "INSERT INTO reviews (content, rating, user_id, beer_id) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&review.content)
    .bind(rating.map(i64::from))
    .bind(review.user_id)
    .bind(review.beer_id)
    .execute(pool)
    .await
    .map_err(|e| StoreError::backend("insert review", e))?;

    Ok(review.into_review(result.last_insert_rowid(), rating))
}

pub(super) async fn list_all(pool: &SqlitePool) -> Result<Vec<Review>, StoreError> {
    fetch_reviews(pool, "list reviews", None).await
}

pub(super) async fn list_by_beer(
    pool: &SqlitePool,
    beer_id: i64,
) -> Result<Vec<Review>, StoreError> {
    fetch_reviews(pool, "list reviews by beer", Some(("beer_id = ?1", beer_id))).await
}

pub(super) async fn list_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Review>, StoreError> {
    fetch_reviews(pool, "list reviews by user", Some(("user_id = ?1", user_id))).await
}

pub(super) async fn list_unrated(pool: &SqlitePool) -> Result<Vec<Review>, StoreError> {
    let rows: Vec<ReviewRow> =
        sqlx::query_as(&format!("{SELECT_REVIEWS} WHERE rating IS NULL ORDER BY id"))
            .fetch_all(pool)
            .await
            .map_err(|e| StoreError::backend("list unrated reviews", e))?;
    rows.into_iter().map(decode_row).collect()
}

pub(super) async fn update_review(pool: &SqlitePool, review: &Review) -> Result<(), StoreError> {
    if review.content.trim().is_empty() {
        return Err(StoreError::Validation(
            "review content must not be empty".into(),
        ));
    }
    let result = sqlx::query(
        "UPDATE reviews SET content = ?1, rating = ?2, user_id = ?3, beer_id = ?4 WHERE id = ?5",
    )
    .bind(&review.content)
    .bind(review.rating.map(i64::from))
    .bind(review.user_id)
    .bind(review.beer_id)
    .bind(review.id)
    .execute(pool)
    .await
    .map_err(|e| StoreError::backend("update review", e))?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { id: review.id });
    }
    Ok(())
}

pub(super) async fn average_rating(
    pool: &SqlitePool,
    beer_id: i64,
) -> Result<Option<f64>, StoreError> {
    sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG(CAST(rating AS REAL)) FROM reviews WHERE beer_id = ?1 AND rating IS NOT NULL",
    )
    .bind(beer_id)
    .fetch_one(pool)
    .await
    .map_err(|e| StoreError::backend("average rating", e))
}
