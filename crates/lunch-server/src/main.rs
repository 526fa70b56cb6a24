mod api;
mod cache;
mod middleware;
mod scheduler;
mod service;

use std::sync::Arc;
use std::time::Duration;

use lunch_scraper::Aggregator;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    scheduler::RefreshScheduler,
    service::MenuService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = lunch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sources = lunch_core::load_sources_or_default(&config.sources_path)?;
    tracing::info!(
        path = %config.sources_path.display(),
        enabled = sources.enabled().count(),
        "loaded menu sources"
    );

    let aggregator = Aggregator::from_config(&config, sources.sources)?;
    let service = Arc::new(MenuService::new(aggregator, config.cache_ttl()));

    let scheduler = if config.scheduler_enabled() {
        Some(
            RefreshScheduler::start(
                Arc::clone(&service),
                &config.refresh_cron,
                Duration::from_secs(config.initial_refresh_delay_secs),
            )
            .await?,
        )
    } else {
        tracing::info!(env = %config.env, "background refresh disabled");
        None
    };

    let app = build_app(AppState { menus: service });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "lunch server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
