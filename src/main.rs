mod config;
mod dispatch;
mod error;
mod handlers;
mod route_table;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("hoghack-page starting");

    let config = Config::from_env()?;
    config.log_startup();

    let routes = routes::urlpatterns().context("Failed to build route table")?;
    routes.log_startup();

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    let state = AppState {
        routes: Arc::new(routes),
        config: Arc::new(config),
    };

    axum::serve(listener, dispatch::app(state))
        .await
        .context("Server error")?;

    Ok(())
}
