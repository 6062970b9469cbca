//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Registration form
//! GET  /products               - Product listing
//! POST /submit                 - Validate and store a product
//! GET  /health                 - Health check
//! ```
//!
//! Any other method or path gets a plain-text 404.

pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::new_form).fallback(not_found))
        .route("/products", get(products::index).fallback(not_found))
        .route("/submit", post(products::submit).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .fallback(not_found)
}

/// Plain-text 404 for unknown paths and unsupported methods.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}
