//! Errors surfaced at the request boundary.

use thiserror::Error;

use crate::notify::DeliveryError;
use crate::submission::{SubmissionKind, ValidationError};

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("webhook for {0} submissions is not configured")]
    NotConfigured(SubmissionKind),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
