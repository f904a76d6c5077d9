pub mod health;

pub use health::{ComponentHealth, HealthRegistry, HealthSnapshot};
