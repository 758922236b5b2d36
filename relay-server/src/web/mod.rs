//! Web server module for the form submission endpoints.
//!
//! This module provides a small web server that:
//! - Receives contact, anonymous and hire submissions as JSON
//! - Validates and forwards each one to its webhook
//! - Answers with the status and body the front-end expects

pub mod handlers;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{anon_message, contact, health, hire_me, AppState, Endpoints, HealthResponse};
pub use response::SubmissionResponse;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(contact))
        .route("/api/anon-message", post(anon_message))
        .route("/api/hire-me", post(hire_me))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
