use serde::{Deserialize, Serialize};
use std::fmt;

/// A review score in `1..=5`.
///
/// Unrated reviews carry `None` rather than a sentinel value, so holding a
/// `Rating` is proof the score is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(InvalidRating(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = InvalidRating;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating {0} is outside 1..=5")]
pub struct InvalidRating(pub i64);

/// A stored review. `id` is assigned by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub content: String,
    pub rating: Option<Rating>,
    pub user_id: i64,
    pub beer_id: i64,
}

impl Review {
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

/// A review submission before storage assigns it an identity.
///
/// `rating` stays a raw integer so the store can reject an out-of-range value
/// with a validation error instead of failing at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub content: String,
    #[serde(default)]
    pub rating: Option<i64>,
    pub user_id: i64,
    pub beer_id: i64,
}

impl NewReview {
    pub fn unrated(content: impl Into<String>, user_id: i64, beer_id: i64) -> Self {
        Self {
            content: content.into(),
            rating: None,
            user_id,
            beer_id,
        }
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Check the submission and return its typed rating.
    pub fn validate(&self) -> Result<Option<Rating>, String> {
        if self.content.trim().is_empty() {
            return Err("review content must not be empty".into());
        }
        self.rating
            .map(Rating::new)
            .transpose()
            .map_err(|e| e.to_string())
    }

    pub fn into_review(self, id: i64, rating: Option<Rating>) -> Review {
        Review {
            id,
            content: self.content,
            rating,
            user_id: self.user_id,
            beer_id: self.beer_id,
        }
    }
}
