//! Review domain types.
//!
//! Beers and users are foreign identifiers here: reviews carry their ids and
//! nothing in this crate creates or mutates them.

mod review;

pub use review::{InvalidRating, NewReview, Rating, Review};
