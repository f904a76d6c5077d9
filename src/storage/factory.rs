use crate::config::StorageConfig;

use super::{InMemoryReviewStore, ReviewStore, SqliteReviewStore};

use std::sync::Arc;

/// Build the configured review store. Schema migrations run here, so a
/// store that comes back `Ok` is ready for use.
pub async fn create_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn ReviewStore>> {
    let store: Arc<dyn ReviewStore> = match config.backend.as_str() {
        "memory" => Arc::new(InMemoryReviewStore::new()),
        "sqlite" => {
            let path = config.resolved_path();
            tracing::info!(path = %path.display(), "opening sqlite review store");
            Arc::new(SqliteReviewStore::open(path).await?)
        }
        other => anyhow::bail!("unknown storage backend '{other}'"),
    };

    Ok(store)
}
