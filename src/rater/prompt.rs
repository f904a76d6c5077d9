use crate::models::{InvalidRating, Rating};

const PROMPT_PREFIX: &str = "rate this review from 1 to 5 and respond with single number only: ";

pub fn build_prompt(content: &str) -> String {
    format!("{PROMPT_PREFIX}{content}")
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("reply is not a single integer: {0:?}")]
    NotANumber(String),

    #[error(transparent)]
    OutOfRange(#[from] InvalidRating),
}

/// Read the model's reply as a rating. Surrounding whitespace is ignored;
/// anything else besides one integer in `1..=5` is refused.
pub fn parse_rating(reply: &str) -> Result<Rating, ReplyError> {
    let trimmed = reply.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ReplyError::NotANumber(trimmed.chars().take(40).collect()))?;
    Ok(Rating::new(value)?)
}
