use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use midmes_chatbot::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    let state = AppState::from_config(&config).context("failed to build application state")?;

    match &config.upstream {
        Some(up) => info!(provider = ?up.kind, model = %up.model, timeout = ?up.timeout, "upstream completion enabled"),
        None => info!("no upstream credential configured, fallback-only mode"),
    }

    // The widget is embedded on other sites.
    let cors = CorsLayer::very_permissive();

    let app = routes::create_router(&config.public_dir)
        .with_state(Arc::new(state))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("MIDMES chatbot running at http://localhost:{}", config.port);
    info!("health: http://localhost:{}/health", config.port);
    info!("chat:   http://localhost:{}/api/chat", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
