use crate::error::RatingError;
use async_trait::async_trait;

/// A remote text-generation endpoint that turns a prompt into free text.
///
/// Implementations only move bytes; interpreting the reply as a rating is the
/// caller's job.
#[async_trait]
pub trait RatingClient: Send + Sync {
    /// Client name
    fn name(&self) -> &str;

    /// Send one non-streaming generation request and return the raw reply.
    async fn query(&self, model: &str, prompt: &str) -> Result<String, RatingError>;
}
