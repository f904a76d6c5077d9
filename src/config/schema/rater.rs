use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the background rater and its Ollama endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaterConfig {
    /// Ollama base URL (default: http://localhost:11434)
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Model used for rating
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on one generation request. Local inference is slow.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Sleep after a poll finds nothing to rate
    #[serde(default = "default_idle_wait_secs")]
    pub idle_wait_secs: u64,
    /// Sleep after a poll fails to read the store
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}

fn default_model() -> String {
    "llama3.2".into()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_idle_wait_secs() -> u64 {
    10
}

fn default_error_backoff_secs() -> u64 {
    2
}

impl RaterConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn idle_wait(&self) -> Duration {
        Duration::from_secs(self.idle_wait_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

impl Default for RaterConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
            idle_wait_secs: default_idle_wait_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}
