mod api;
mod app_state;
mod core;
mod domain;
mod errors;
mod routes;

use std::net::SocketAddr;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = crate::core::config::AppConfig::from_env();

    // Daily-rolling file log alongside stdout; RUST_LOG controls verbosity.
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "tripflow.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(file_writer.and(std::io::stdout))
        .with_ansi(false)
        .init();

    if config.ai.api_key.is_none() {
        tracing::warn!("AI API key not configured; itinerary generation and voice parsing are disabled");
    }
    if config.geocode.api_key.is_none() {
        tracing::warn!("geocoding API key not configured; itineraries will not be enriched with coordinates");
    }

    let state = app_state::build_app_state(&config);
    let app = routes::app_router().with_state(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("tripflow-core listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
