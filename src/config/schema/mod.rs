mod core;
mod gateway;
mod rater;
mod storage;

pub use core::{Config, ReliabilityConfig};
pub use gateway::GatewayConfig;
pub use rater::RaterConfig;
pub use storage::{STORAGE_BACKENDS, StorageConfig};
