use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const STORAGE_BACKENDS: [&str; 2] = ["sqlite", "memory"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "sqlite" | "memory"
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// SQLite database file; `~` is expanded
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_backend() -> String {
    "sqlite".into()
}

fn default_storage_path() -> String {
    "~/.beer-reviews/reviews.db".into()
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).into_owned())
    }

    pub fn is_in_memory(&self) -> bool {
        self.backend == "memory"
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_storage_path(),
        }
    }
}
