pub mod schema;

pub use schema::{Config, GatewayConfig, RaterConfig, ReliabilityConfig, StorageConfig};
