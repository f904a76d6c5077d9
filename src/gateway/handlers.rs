use super::error::ApiError;
use super::{AppState, AverageRatingQuery, ListReviewsQuery, SubmitReviewBody};
use crate::models::{NewReview, Review};
use axum::{
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json},
};

fn query_error(rejection: &QueryRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

fn body_error(rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// GET /health
pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let storage_ok = state.store.health_check().await;
    let snapshot = state.health.snapshot();
    let (status, label) = if storage_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = serde_json::json!({
        "status": label,
        "storage": storage_ok,
        "backend": state.store.name(),
        "uptime_seconds": snapshot.uptime_seconds,
        "components": snapshot.components,
    });
    (status, Json(body))
}

/// POST /review
///
/// Any rating in the body is ignored; new reviews always start unrated.
pub async fn handle_submit_review(
    State(state): State<AppState>,
    body: Result<Json<SubmitReviewBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let Json(body) = body.map_err(|rejection| body_error(&rejection))?;
    let review = state
        .store
        .add_review(NewReview::unrated(body.content, body.user_id, body.beer_id))
        .await?;
    tracing::debug!(review_id = review.id, beer_id = review.beer_id, "review submitted");
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /reviews?beer_id=&user_id=
pub async fn handle_list_reviews(
    State(state): State<AppState>,
    query: Result<Query<ListReviewsQuery>, QueryRejection>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let Query(query) = query.map_err(|rejection| query_error(&rejection))?;
    let reviews = match (query.beer_id, query.user_id) {
        (Some(beer_id), user_id) => {
            let mut reviews = state.store.list_reviews_by_beer_id(beer_id).await?;
            if let Some(user_id) = user_id {
                reviews.retain(|review| review.user_id == user_id);
            }
            reviews
        }
        (None, Some(user_id)) => state.store.list_reviews_by_user_id(user_id).await?,
        (None, None) => state.store.list_reviews().await?,
    };
    Ok(Json(reviews))
}

/// GET /avg_rating?beer_id=
///
/// `avg_rating` is `null` when the beer has no rated reviews.
pub async fn handle_average_rating(
    State(state): State<AppState>,
    query: Result<Query<AverageRatingQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(query) = query.map_err(|rejection| query_error(&rejection))?;
    let beer_id = query
        .beer_id
        .ok_or_else(|| ApiError::BadRequest("beer_id query parameter is required".into()))?;
    let average = state.store.average_rating(beer_id).await?;
    Ok(Json(serde_json::json!({
        "beer_id": beer_id,
        "avg_rating": average,
    })))
}

/// Router fallback for unknown paths.
pub async fn handle_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

/// Router fallback for a known path with the wrong method.
pub async fn handle_method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}
