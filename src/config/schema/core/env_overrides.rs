use super::Config;

fn env_value(primary: &str, fallback: Option<&str>) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| fallback.and_then(|key| std::env::var(key).ok()))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(port_str) = env_value("BEER_REVIEWS_PORT", Some("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = env_value("BEER_REVIEWS_HOST", Some("HOST")) {
            self.gateway.host = host;
        }

        if let Some(backend) = env_value("BEER_REVIEWS_STORAGE", None) {
            self.storage.backend = backend.to_ascii_lowercase();
        }

        if let Some(path) = env_value("BEER_REVIEWS_DB_PATH", Some("DB_PATH")) {
            self.storage.path = path;
        }

        if let Some(url) = env_value("BEER_REVIEWS_OLLAMA_URL", Some("OLLAMA_URL")) {
            self.rater.ollama_url = url;
        }

        if let Some(model) = env_value("BEER_REVIEWS_OLLAMA_MODEL", Some("OLLAMA_MODEL")) {
            self.rater.model = model;
        }

        if let Some(level) = env_value("BEER_REVIEWS_LOG_LEVEL", None) {
            self.log_level = level;
        }
    }
}
