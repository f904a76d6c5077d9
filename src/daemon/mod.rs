//! Single-process deployment: the review API and the rater run side by side
//! over one store, each under its own restart supervisor.

use crate::config::Config;
use crate::diagnostics::HealthRegistry;
use crate::gateway::{AppState, GATEWAY_COMPONENT, run_gateway};
use crate::rater::{RATER_COMPONENT, ReviewRater};
use crate::rating::{OllamaClient, RatingClient};
use crate::storage::create_store;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

mod supervisor;

use supervisor::spawn_component_supervisor;

const DAEMON_COMPONENT: &str = "daemon";
/// Longer than the request timeout so in-flight requests can drain.
const SHUTDOWN_GRACE_SECS: u64 = 35;

/// Cancel the returned token on Ctrl-C.
pub fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("shutdown requested"),
            Err(e) => tracing::error!("failed to listen for Ctrl-C: {e}"),
        }
        trigger.cancel();
    });
    token
}

pub async fn run(config: Arc<Config>, shutdown: CancellationToken) -> Result<()> {
    let health = Arc::new(HealthRegistry::new());
    let store = create_store(&config.storage)
        .await
        .context("open review store")?;
    let client: Arc<dyn RatingClient> = Arc::new(
        OllamaClient::new(&config.rater.ollama_url, config.rater.request_timeout())
            .context("create rating client")?,
    );

    let state = AppState::new(Arc::clone(&store), Arc::clone(&health));
    let rater = Arc::new(ReviewRater::new(
        store,
        client,
        Arc::clone(&health),
        &config.rater,
    ));

    health.mark_ok(DAEMON_COMPONENT);

    let gateway_cfg = Arc::clone(&config);
    let gateway_shutdown = shutdown.clone();
    let rater_shutdown = shutdown.clone();
    let handles: Vec<JoinHandle<()>> = vec![
        spawn_component_supervisor(
            GATEWAY_COMPONENT,
            &config.reliability,
            Arc::clone(&health),
            shutdown.clone(),
            move || {
                let cfg = Arc::clone(&gateway_cfg);
                let state = state.clone();
                let token = gateway_shutdown.clone();
                async move { run_gateway(&cfg.gateway, state, token).await }
            },
        ),
        spawn_component_supervisor(
            RATER_COMPONENT,
            &config.reliability,
            Arc::clone(&health),
            shutdown.clone(),
            move || {
                let rater = Arc::clone(&rater);
                let token = rater_shutdown.clone();
                async move {
                    rater.run(token).await;
                    Ok(())
                }
            },
        ),
    ];

    println!("Daemon started: review API and rater are running");
    println!("   API: http://{}:{}", config.gateway.host, config.gateway.port);
    println!("   Rater model: {}", config.rater.model);
    println!("   Ctrl+C to stop");

    shutdown.cancelled().await;
    health.mark_stopped(DAEMON_COMPONENT);
    wait_for_components(handles).await;
    Ok(())
}

async fn wait_for_components(handles: Vec<JoinHandle<()>>) {
    let aborts: Vec<_> = handles.iter().map(JoinHandle::abort_handle).collect();
    let drain = async {
        for handle in handles {
            let _ = handle.await;
        }
    };

    if tokio::time::timeout(Duration::from_secs(SHUTDOWN_GRACE_SECS), drain)
        .await
        .is_err()
    {
        tracing::warn!("components did not stop within {SHUTDOWN_GRACE_SECS}s; aborting");
        for abort in aborts {
            abort.abort();
        }
    }
}
