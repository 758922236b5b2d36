//! Contact form submissions.
//!
//! The form carries a hidden `website` input that people never fill in; a
//! value there marks the submission as automated and it is dropped.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::fields;
use super::{Intake, Submission, SubmissionKind, ValidationError};
use crate::notify::NotificationPayload;

/// Name of the honeypot input.
pub const HONEYPOT_FIELD: &str = "website";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Submission for ContactMessage {
    const KIND: SubmissionKind = SubmissionKind::Contact;

    fn from_fields(body: &Map<String, Value>) -> Result<Intake<Self>, ValidationError> {
        if fields::is_filled(body.get(HONEYPOT_FIELD)) {
            return Ok(Intake::Honeypot);
        }

        let [name, email, message] = fields::required(body, ["name", "email", "message"])
            .map_err(|missing| ValidationError {
                kind: Self::KIND,
                missing,
            })?;

        Ok(Intake::Accepted(ContactMessage {
            name,
            email,
            subject: fields::loose_text(body, "subject"),
            message,
        }))
    }

    fn to_payload(&self, _now: DateTime<Utc>) -> NotificationPayload {
        NotificationPayload::text(format!(
            "**New contact form submission**\n**Name:** {}\n**Email:** {}\n**Subject:** {}\n**Message:**\n{}",
            self.name,
            self.email,
            self.subject.as_deref().unwrap_or("-"),
            self.message,
        ))
    }
}
