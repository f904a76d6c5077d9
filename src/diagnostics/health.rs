use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    pub updated_at: String,
    pub last_ok: Option<String>,
    pub last_error: Option<String>,
    pub restart_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub pid: u32,
    pub updated_at: String,
    pub uptime_seconds: u64,
    pub components: BTreeMap<String, ComponentHealth>,
}

/// Per-process component health, created once at startup and shared by
/// handle (`Arc<HealthRegistry>`) with the gateway, the rater and the
/// daemon supervisor.
pub struct HealthRegistry {
    started_at: Instant,
    components: RwLock<BTreeMap<String, ComponentHealth>>,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            components: RwLock::new(BTreeMap::new()),
        }
    }

    fn upsert_component<F>(&self, component: &str, update: F)
    where
        F: FnOnce(&mut ComponentHealth),
    {
        if let Ok(mut map) = self.components.write() {
            let now = now_rfc3339();
            let entry = map
                .entry(component.to_string())
                .or_insert_with(|| ComponentHealth {
                    status: "starting".into(),
                    updated_at: now.clone(),
                    last_ok: None,
                    last_error: None,
                    restart_count: 0,
                });
            update(entry);
            entry.updated_at = now;
        }
    }

    pub fn mark_starting(&self, component: &str) {
        self.upsert_component(component, |entry| {
            entry.status = "starting".into();
        });
    }

    pub fn mark_ok(&self, component: &str) {
        self.upsert_component(component, |entry| {
            entry.status = "ok".into();
            entry.last_ok = Some(now_rfc3339());
            entry.last_error = None;
        });
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn mark_error(&self, component: &str, error: impl ToString) {
        let err = error.to_string();
        self.upsert_component(component, move |entry| {
            entry.status = "error".into();
            entry.last_error = Some(err);
        });
    }

    pub fn mark_stopped(&self, component: &str) {
        self.upsert_component(component, |entry| {
            entry.status = "stopped".into();
        });
    }

    pub fn bump_restart(&self, component: &str) {
        self.upsert_component(component, |entry| {
            entry.restart_count = entry.restart_count.saturating_add(1);
        });
    }

    pub fn component(&self, component: &str) -> Option<ComponentHealth> {
        self.components
            .read()
            .ok()
            .and_then(|map| map.get(component).cloned())
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        let components = self
            .components
            .read()
            .map_or_else(|_| BTreeMap::new(), |map| map.clone());

        HealthSnapshot {
            pid: std::process::id(),
            updated_at: now_rfc3339(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            components,
        }
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}
