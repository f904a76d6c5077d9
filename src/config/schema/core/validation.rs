use super::super::STORAGE_BACKENDS;
use super::Config;
use crate::error::ConfigError;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !STORAGE_BACKENDS.contains(&self.storage.backend.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown storage backend '{}'. Supported: {}",
                self.storage.backend,
                STORAGE_BACKENDS.join(", ")
            )));
        }
        if !self.storage.is_in_memory() && self.storage.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path must be set for the sqlite backend".into(),
            ));
        }

        let url = url::Url::parse(&self.rater.ollama_url).map_err(|e| {
            ConfigError::Validation(format!(
                "rater.ollama_url '{}' is not a URL: {e}",
                self.rater.ollama_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "rater.ollama_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.rater.model.trim().is_empty() {
            return Err(ConfigError::Validation("rater.model must not be empty".into()));
        }
        if self.rater.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "rater.request_timeout_secs must be greater than zero".into(),
            ));
        }

        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| {
                ConfigError::Validation(format!("unknown log_level '{}'", self.log_level))
            })?;

        Ok(())
    }

    /// The standalone rater only makes sense against storage another process
    /// can also reach.
    pub fn validate_standalone_rater(&self) -> Result<(), ConfigError> {
        if self.storage.is_in_memory() {
            return Err(ConfigError::Validation(
                "the standalone rater cannot use the memory backend: it would never see \
                 reviews submitted to the API. Use `daemon`, or storage.backend = \"sqlite\""
                    .into(),
            ));
        }
        Ok(())
    }
}
