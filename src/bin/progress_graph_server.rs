//! Progress Graph Web Server
//!
//! Serves the graph payload to the browser front end and, when
//! `static_dir` is configured, the front end itself.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use progress_graph::api::{create_graph_router, GraphState};
use progress_graph::GraphConfig;

/// Default configuration path
const DEFAULT_CONFIG_PATH: &str = "progress-graph.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "progress_graph=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting progress graph server");

    let config_path =
        std::env::var("PROGRESS_GRAPH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = if std::path::Path::new(&config_path).is_file() {
        tracing::info!(path = %config_path, "Loading configuration");
        GraphConfig::from_file(&config_path)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?
    } else {
        tracing::warn!(path = %config_path, "Config file not found, using defaults");
        GraphConfig::default()
    }
    .apply_env();

    if config.data_source_id.is_empty() {
        tracing::warn!("No data source configured; /api/graph will fail until SPREADSHEET_ID is set");
    }

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_addr))?;
    let static_dir = config.static_dir.clone();

    let mut app = create_graph_router(GraphState::new(config));
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving front end");
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
