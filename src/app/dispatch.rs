use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use beer_reviews::config::Config;
use beer_reviews::daemon;
use beer_reviews::diagnostics::HealthRegistry;
use beer_reviews::gateway::{AppState, run_gateway};
use beer_reviews::rater::ReviewRater;
use beer_reviews::rating::{OllamaClient, RatingClient};
use beer_reviews::storage::{SqliteReviewStore, create_store};
use std::sync::Arc;
use tracing::info;

fn apply_bind_overrides(config: &mut Config, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.gateway.host = host;
    }
    if let Some(port) = port {
        config.gateway.port = port;
    }
}

async fn run_serve(config: Config) -> Result<()> {
    let store = create_store(&config.storage)
        .await
        .context("open review store")?;
    let state = AppState::new(store, Arc::new(HealthRegistry::new()));
    run_gateway(&config.gateway, state, daemon::shutdown_on_ctrl_c()).await
}

async fn run_rater(config: Config) -> Result<()> {
    config.validate_standalone_rater()?;

    let store = create_store(&config.storage)
        .await
        .context("open review store")?;
    let client: Arc<dyn RatingClient> = Arc::new(
        OllamaClient::new(&config.rater.ollama_url, config.rater.request_timeout())
            .context("create rating client")?,
    );
    let rater = ReviewRater::new(
        store,
        client,
        Arc::new(HealthRegistry::new()),
        &config.rater,
    );

    rater.run(daemon::shutdown_on_ctrl_c()).await;
    Ok(())
}

async fn run_migrate(config: &Config) -> Result<()> {
    if config.storage.is_in_memory() {
        bail!("the memory backend keeps no schema; nothing to migrate");
    }
    let path = config.storage.resolved_path();
    let store = SqliteReviewStore::open(path.clone()).await?;
    let version = store.schema_version().await?;
    info!(path = %path.display(), version, "review schema is up to date");
    println!("Review schema at version {version} ({})", path.display());
    Ok(())
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            apply_bind_overrides(&mut config, host, port);
            run_serve(config).await
        }
        Commands::Rater => run_rater(config).await,
        Commands::Daemon { port, host } => {
            apply_bind_overrides(&mut config, host, port);
            daemon::run(Arc::new(config), daemon::shutdown_on_ctrl_c()).await
        }
        Commands::Migrate => run_migrate(&config).await,
    }
}
