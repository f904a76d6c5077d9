//! Background rater: finds unrated reviews, asks the model for a score and
//! writes it back.
//!
//! Discovery is polling only. A review whose rating fails for any reason is
//! left unrated and comes back on a later poll, so delivery is at-least-once
//! and a review may be sent to the model more than once.

mod prompt;
mod worker;

pub use prompt::{ReplyError, build_prompt, parse_rating};
pub use worker::{CycleReport, ReviewRater};

/// Health registry key for the rater.
pub const RATER_COMPONENT: &str = "rater";
