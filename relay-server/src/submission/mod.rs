//! Form submission types and validation.
//!
//! Bodies arrive as untyped JSON and are checked field by field:
//!
//! ```text
//! JSON object → honeypot check → required fields → typed submission
//! ```
//!
//! Each variant implements [`Submission`], which is all the relay pipeline
//! needs to know about it.

pub mod anonymous;
pub mod contact;
pub mod fields;
pub mod hire;

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::notify::NotificationPayload;

pub use anonymous::AnonymousMessage;
pub use contact::ContactMessage;
pub use hire::HireRequest;

/// The three submission variants accepted by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Contact,
    Anonymous,
    Hire,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contact",
            SubmissionKind::Anonymous => "anonymous",
            SubmissionKind::Hire => "hire",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading a submission body.
#[derive(Debug, Clone, PartialEq)]
pub enum Intake<S> {
    /// A well-formed submission to forward.
    Accepted(S),
    /// The honeypot field was filled; drop silently.
    Honeypot,
}

/// A submission is missing one or more required text fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} submission is missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub kind: SubmissionKind,
    pub missing: Vec<&'static str>,
}

/// A form variant the relay knows how to validate and format.
pub trait Submission: Sized {
    const KIND: SubmissionKind;

    /// Validate a JSON object into a typed submission.
    fn from_fields(body: &Map<String, Value>) -> Result<Intake<Self>, ValidationError>;

    /// Build the outbound webhook payload.
    fn to_payload(&self, now: DateTime<Utc>) -> NotificationPayload;

    /// Validate any JSON value. Non-objects are read as an empty object.
    fn from_json(body: &Value) -> Result<Intake<Self>, ValidationError> {
        match body.as_object() {
            Some(map) => Self::from_fields(map),
            None => Self::from_fields(&Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            kind: SubmissionKind::Contact,
            missing: vec!["name", "email"],
        };
        assert_eq!(
            err.to_string(),
            "contact submission is missing required fields: name, email"
        );
    }

    #[test]
    fn test_non_object_body_reads_as_empty() {
        let err = AnonymousMessage::from_json(&json!(["hello"])).unwrap_err();
        assert_eq!(err.missing, vec!["message"]);

        let err = HireRequest::from_json(&Value::Null).unwrap_err();
        assert_eq!(err.missing, vec!["name", "email", "project"]);
    }
}
