//! REST API for sizing requests and catalog data.
//!
//! Routes:
//! - `GET /catalog`: models, scenarios, starter types, and policy
//! - `POST /size`: size a site from a JSON body
//! - `GET /presets/{name}`: size a built-in preset

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::sizing::SizingEngine;

pub use types::{CatalogResponse, ErrorResponse, SizingResponse};

/// Immutable application state shared across all request handlers.
///
/// The engine holds no mutable state, so no locks are needed.
pub struct AppState {
    /// Engine with the catalog to size against.
    pub engine: SizingEngine,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/size", post(handlers::post_size))
        .route("/presets/{name}", get(handlers::get_preset))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
