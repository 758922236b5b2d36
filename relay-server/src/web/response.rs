//! Caller-facing response bodies.
//!
//! Each form kind answers in the shape its front-end expects. Contact and
//! anonymous forms read `error`; the hire dialog reads `ok` and `message`.
//! Downstream detail never reaches the caller.

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::RelayError;
use crate::notify::DeliveryError;
use crate::submission::SubmissionKind;

/// JSON body returned by the submission endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    fn accepted(message: Option<&str>) -> Self {
        Self {
            ok: Some(true),
            message: message.map(str::to_string),
            error: None,
        }
    }

    fn error(error: impl Into<String>) -> Self {
        Self {
            ok: None,
            message: None,
            error: Some(error.into()),
        }
    }

    fn declined(message: impl Into<String>) -> Self {
        Self {
            ok: Some(false),
            message: Some(message.into()),
            error: None,
        }
    }
}

pub type Reply = (StatusCode, Json<SubmissionResponse>);

const NOT_CONFIGURED: &str = "Service configuration error. Please try again later.";

/// Response for an accepted submission, forwarded or discarded alike.
pub fn success(kind: SubmissionKind) -> Reply {
    let message = match kind {
        SubmissionKind::Contact => None,
        SubmissionKind::Anonymous => Some("Anonymous message sent — thank you!"),
        SubmissionKind::Hire => {
            Some("Request submitted successfully! I'll get back to you within 12-24 hours.")
        }
    };

    (StatusCode::OK, Json(SubmissionResponse::accepted(message)))
}

/// Map a relay failure to a status and a non-technical message.
///
/// `contact_email` is quoted to hire-request callers so they have another
/// way to reach out.
pub fn failure(kind: SubmissionKind, err: &RelayError, contact_email: Option<&str>) -> Reply {
    let (status, body) = match kind {
        SubmissionKind::Contact => match err {
            RelayError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                SubmissionResponse::error("name, email and message are required"),
            ),
            RelayError::NotConfigured(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionResponse::error(NOT_CONFIGURED),
            ),
            RelayError::Delivery(DeliveryError::Rejected { .. }) => (
                StatusCode::BAD_GATEWAY,
                SubmissionResponse::error("failed to send to webhook"),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionResponse::error("server error"),
            ),
        },
        SubmissionKind::Anonymous => match err {
            RelayError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                SubmissionResponse::error("Message is required"),
            ),
            RelayError::NotConfigured(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionResponse::error(NOT_CONFIGURED),
            ),
            RelayError::Delivery(DeliveryError::Rejected { .. }) => (
                StatusCode::BAD_GATEWAY,
                SubmissionResponse::error("Failed to send message"),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionResponse::error("Server error"),
            ),
        },
        SubmissionKind::Hire => match err {
            RelayError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                SubmissionResponse::declined("Missing required fields"),
            ),
            RelayError::NotConfigured(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionResponse::declined("Service configuration error. Please email me instead."),
            ),
            // The hire dialog has no separate state for a gateway failure.
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SubmissionResponse::declined(match contact_email {
                    Some(email) => format!("Failed to send request. Please email me directly at {email}"),
                    None => "Failed to send request. Please email me directly.".to_string(),
                }),
            ),
        },
    };

    (status, Json(body))
}
