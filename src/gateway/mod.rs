//! Axum-based review API.
//!
//! Routes:
//! - `GET  /health`
//! - `POST /review`
//! - `GET  /reviews?beer_id=&user_id=`
//! - `GET  /avg_rating?beer_id=`
//!
//! Every route sits behind a 64KB body limit, a 30s request timeout and
//! per-request logging. Errors, including unknown routes and timeouts, are
//! rendered by [`ApiError`] as `{"statusCode", "message"}`.

mod error;
mod handlers;
mod request_log;
mod server;

pub use error::{ApiError, ErrorBody};
pub use request_log::REQUEST_ID_HEADER;
pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::diagnostics::HealthRegistry;
use crate::storage::ReviewStore;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Maximum request body size (64KB) -- prevents memory exhaustion
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s) -- prevents slow-loris attacks
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Health registry key for the gateway.
pub const GATEWAY_COMPONENT: &str = "gateway";

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReviewStore>,
    pub health: Arc<HealthRegistry>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReviewStore>, health: Arc<HealthRegistry>) -> Self {
        Self { store, health }
    }
}

/// POST /review body. Unknown fields (`id`, `rating`) are ignored.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewBody {
    pub content: String,
    pub user_id: i64,
    pub beer_id: i64,
}

/// GET /reviews filters. An empty value (`?beer_id=`) means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListReviewsQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub beer_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<i64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("expected an integer, got '{value}'"))
        }),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AverageRatingQuery {
    pub beer_id: Option<i64>,
}
