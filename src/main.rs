mod api_doc;
mod config;
mod dispatch;
mod error;
mod handlers;
mod models;
mod router;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::Config;
use state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "community_metrics_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("community-metrics-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let bind_address = config.bind_address();
    let state = AppState::new(config).context("Failed to build route table")?;
    tracing::info!("Route table ready with {} routes", state.routes.len());
    for entry in state.routes.entries() {
        tracing::debug!("  {} {} -> {}", entry.method(), entry.pattern().as_str(), entry.name());
    }

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, dispatch::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
