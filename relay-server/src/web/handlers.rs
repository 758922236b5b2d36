//! Submission endpoint handlers.
//!
//! Every handler is the same three steps:
//! 1. Run the shared relay pipeline for its submission kind
//! 2. Map the outcome to a status and JSON body
//! 3. Return
//!
//! Bodies are taken as raw bytes so malformed JSON is handled by the relay
//! instead of axum's extractor rejection.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::notify::{Deliver, RetryPolicy, WebhookClient};
use crate::relay::relay;
use crate::submission::{AnonymousMessage, ContactMessage, HireRequest, Submission, SubmissionKind};
use crate::web::response;
use crate::Config;

/// Delivery targets, one per submission kind. `None` means not configured.
#[derive(Clone, Default)]
pub struct Endpoints {
    pub contact: Option<Arc<dyn Deliver>>,
    pub anonymous: Option<Arc<dyn Deliver>>,
    pub hire: Option<Arc<dyn Deliver>>,
}

impl Endpoints {
    /// Build HTTP webhook clients for every configured URL, sharing one
    /// connection pool.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.webhook_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let retry = RetryPolicy {
            max_retries: config.webhook_max_retries,
            base_delay: std::time::Duration::from_millis(config.webhook_retry_base_delay_ms),
        };

        let build = |kind: SubmissionKind| -> Option<Arc<dyn Deliver>> {
            config.webhook_url(kind).map(|url| {
                Arc::new(WebhookClient::new(client.clone(), url.clone()).with_retry(retry))
                    as Arc<dyn Deliver>
            })
        };

        Ok(Self {
            contact: build(SubmissionKind::Contact),
            anonymous: build(SubmissionKind::Anonymous),
            hire: build(SubmissionKind::Hire),
        })
    }

    pub fn get(&self, kind: SubmissionKind) -> Option<&dyn Deliver> {
        let endpoint = match kind {
            SubmissionKind::Contact => &self.contact,
            SubmissionKind::Anonymous => &self.anonymous,
            SubmissionKind::Hire => &self.hire,
        };
        endpoint.as_deref()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub endpoints: Endpoints,
}

impl AppState {
    pub fn new(config: Config, endpoints: Endpoints) -> Self {
        Self {
            config: Arc::new(config),
            endpoints,
        }
    }

    /// Build state with HTTP webhook clients for the configured URLs.
    pub fn from_config(config: Config) -> Result<Self> {
        let endpoints = Endpoints::from_config(&config)?;
        Ok(Self::new(config, endpoints))
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Submissions
// =============================================================================

async fn handle<S: Submission>(state: &AppState, body: &[u8]) -> response::Reply {
    let kind = S::KIND;
    info!(kind = %kind, body_length = body.len(), "submission_received");

    match relay::<S>(state.endpoints.get(kind), body, Utc::now()).await {
        Ok(_) => response::success(kind),
        Err(e) => response::failure(kind, &e, state.config.contact_email.as_deref()),
    }
}

/// `POST /api/contact`
pub async fn contact(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    handle::<ContactMessage>(&state, &body).await
}

/// `POST /api/anon-message`
pub async fn anon_message(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    handle::<AnonymousMessage>(&state, &body).await
}

/// `POST /api/hire-me`
pub async fn hire_me(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    handle::<HireRequest>(&state, &body).await
}
