//! # HTTP Server for Style Resolution and Previews
//!
//! Exposes the style engine and the chart builder over JSON, and proxies
//! report previews through the latest-wins orchestrator.
//!
//! ## Usage
//!
//! ```bash
//! tincture serve --listen 0.0.0.0:8080 --backend http://localhost:5000/api
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Body | Returns |
//! |--------|------|------|---------|
//! | GET | `/api/style/defaults` | | resolved defaults |
//! | POST | `/api/style/resolve` | raw style, any shape | resolved style |
//! | POST | `/api/style/merge` | `{base, patch}` | raw merge and resolved style |
//! | POST | `/api/chart/build` | `{style?, data, kind?, chart_area?}` | chart view |
//! | POST | `/api/preview` | `{session?, style?, request}` | session id and preview state |
//!
//! Each preview session keeps its own latest-wins orchestrator, so clients
//! never supersede each other's previews.

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::TinctureError;

/// Build the API router around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/style/defaults", get(handlers::style::defaults))
        .route("/api/style/resolve", post(handlers::style::resolve))
        .route("/api/style/merge", post(handlers::style::merge))
        .route("/api/chart/build", post(handlers::chart::build))
        .route("/api/preview", post(handlers::preview::preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use tincture::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), tincture::error::TinctureError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     backend_url: "http://localhost:5000/api".to_string(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), TinctureError> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let app = router(app_state);

    tracing::info!(
        listen = %config.listen_addr,
        backend = %config.backend_url,
        "tincture HTTP server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            TinctureError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| TinctureError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
