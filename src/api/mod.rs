// src/api/mod.rs — HTTP transport for the question pipeline

pub mod handlers;
pub mod types;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::Pipeline;
use crate::infra::config::ServerConfig;
pub use types::AskRequest;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<Pipeline>,
}

/// Build the axum router with all routes.
pub fn build_router(state: ApiState) -> Router {
    let origins = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .into_iter()
    .map(HeaderValue::from_static)
    .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/ask", post(handlers::ask))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Start the API server (runs until the process is stopped).
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Synapse listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
