use crate::config::ReliabilityConfig;
use crate::diagnostics::HealthRegistry;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

/// Run `run_component` until `shutdown` fires, restarting it with
/// exponential backoff whenever it fails or returns early.
pub(super) fn spawn_component_supervisor<F, Fut>(
    name: &'static str,
    policy: &ReliabilityConfig,
    health: Arc<HealthRegistry>,
    shutdown: CancellationToken,
    mut run_component: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let initial_backoff = policy.initial_backoff_secs.max(1);
    let max_backoff = policy.max_backoff_secs.max(initial_backoff);
    let max_restarts = policy.max_restarts;

    tokio::spawn(async move {
        let mut backoff = initial_backoff;
        let mut consecutive_failures: u32 = 0;

        loop {
            tracing::info!("Daemon component '{name}' starting");
            let result = run_component().await;
            if shutdown.is_cancelled() {
                if let Err(e) = result {
                    tracing::warn!("Daemon component '{name}' failed during shutdown: {e}");
                }
                break;
            }

            match result {
                Ok(()) => {
                    tracing::warn!("Daemon component '{name}' exited unexpectedly");
                    backoff = initial_backoff;
                }
                Err(e) => {
                    tracing::error!("Daemon component '{name}' failed: {e}");
                    health.mark_error(name, &e);
                }
            }
            consecutive_failures = consecutive_failures.saturating_add(1);

            if max_restarts > 0 && consecutive_failures > max_restarts {
                tracing::error!(
                    "Daemon component '{name}' exceeded max restarts ({max_restarts}), circuit open"
                );
                health.mark_error(name, format!("gave up after {max_restarts} restarts"));
                break;
            }

            health.bump_restart(name);
            tokio::select! {
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(Duration::from_secs(backoff)) => {}
            }
            backoff = backoff.saturating_mul(2).min(max_backoff);
        }
    })
}
