#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use beer_reviews::diagnostics::HealthRegistry;
use beer_reviews::gateway::{AppState, run_gateway_with_listener};
use beer_reviews::storage::{InMemoryReviewStore, ReviewStore};

pub struct GatewayTestServer {
    pub port: u16,
    pub store: Arc<dyn ReviewStore>,
    pub health: Arc<HealthRegistry>,
    shutdown: CancellationToken,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    pub async fn start() -> Self {
        Self::start_with_store(Arc::new(InMemoryReviewStore::new())).await
    }

    pub async fn start_with_store(store: Arc<dyn ReviewStore>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let health = Arc::new(HealthRegistry::new());
        let state = AppState::new(Arc::clone(&store), Arc::clone(&health));
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let handle =
            tokio::spawn(async move { run_gateway_with_listener(listener, state, token).await });

        wait_until_gateway_ready(port).await;

        Self {
            port,
            store,
            health,
            shutdown,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        self.shutdown.cancel();
        let handle = std::mem::replace(&mut self.handle, tokio::spawn(async { Ok(()) }));
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("gateway should stop after shutdown")
            .expect("gateway task should not panic")
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}
