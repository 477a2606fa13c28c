// Estate Catalog - REST API with Axum
//
// Thin translation layer: parse path/body, validate against the entity
// shapes, call the storage engine, map the outcome to a status code.

use crate::config::Settings;
use crate::storage::Storage;
use anyhow::Context;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
mod blog_posts;
mod contact;
mod properties;

pub use error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        AppState { storage }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

/// API routes, relative to the API prefix
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/properties", properties::router())
        .nest("/blog-posts", blog_posts::router())
        .nest("/contact", contact::router())
        .with_state(state)
}

/// Full application: API nested under `api_prefix`, plus tracing and CORS
pub fn app(state: AppState, api_prefix: &str) -> Router {
    let api = api_router(state);
    let router = if api_prefix == "/" {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

/// Bind and serve until the process is stopped
pub async fn serve(settings: &Settings, storage: Arc<dyn Storage>) -> anyhow::Result<()> {
    let app = app(AppState::new(storage), &settings.server.api_prefix);

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!(
        address = %addr,
        api_prefix = %settings.server.api_prefix,
        "estate catalog server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running server")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
