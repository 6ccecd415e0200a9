//! Deed Validator API - HTTP front end for deed validation
//!
//! Provides REST endpoints for:
//! - Validating a deed from OCR text or extracted fields
//! - Listing the known counties and tax rates
//! - Health checks

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the router with all routes and middleware
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/validate", post(handlers::validate))
        .route("/counties", get(handlers::counties))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
