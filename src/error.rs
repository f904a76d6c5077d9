use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `beer-reviews`.
///
/// Each subsystem defines its own error enum. Library callers match on these
/// to decide recovery strategy; startup plumbing continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ReviewsError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Storage port ────────────────────────────────────────────────────
    #[error("storage: {0}")]
    Store(#[from] StoreError),

    // ── Rating client ───────────────────────────────────────────────────
    #[error("rating: {0}")]
    Rating(#[from] RatingError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ─────────────────────────────────────────────────────────

/// The only error kinds a storage backend may surface.
///
/// Both backends map their failures onto these variants, so callers cannot
/// tell which backend they are talking to from the error alone.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid review: {0}")]
    Validation(String),

    #[error("review {id} not found")]
    NotFound { id: i64 },

    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Backend(format!("{operation}: {err}"))
    }
}

// ─── Rating client errors ───────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream responded with {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RatingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ReviewsError>;
