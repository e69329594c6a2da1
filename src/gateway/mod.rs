//! HTTP liveness endpoint for uptime monitors.
//!
//! Stateless: it never touches the dispatcher or the resonance counter.
use anyhow::{Context, Result};
use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, http::StatusCode};
use tracing::{error, info};

pub const LIVENESS_BODY: &str = "I am alive. Resonance is unbroken.";

/// Build the HTTP router.
pub fn build_router() -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/api/health", get(health_handler))
}

/// GET /: plain-text liveness confirmation.
async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_BODY)
}

/// GET /api/health: machine-readable health check.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Bind the listener and serve in a background task.
///
/// Binding happens before this returns, so a port conflict fails startup.
pub async fn start(host: &str, port: u16) -> Result<tokio::task::JoinHandle<()>> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind liveness endpoint on {}", addr))?;
    info!("Health check server is running at http://{}", addr);

    let app = build_router();
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    });

    Ok(handle)
}
