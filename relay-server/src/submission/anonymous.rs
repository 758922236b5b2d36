//! Anonymous messages: a single free-text field, no identity.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::fields;
use super::{Intake, Submission, SubmissionKind, ValidationError};
use crate::notify::{Embed, NotificationPayload};

const TITLE: &str = "📩 New Anonymous Message";
const COLOR: u32 = 0x8b5cf0;
const FOOTER: &str = "Portfolio Anonymous Message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousMessage {
    pub message: String,
}

impl Submission for AnonymousMessage {
    const KIND: SubmissionKind = SubmissionKind::Anonymous;

    fn from_fields(body: &Map<String, Value>) -> Result<Intake<Self>, ValidationError> {
        let [message] = fields::required(body, ["message"]).map_err(|missing| ValidationError {
            kind: Self::KIND,
            missing,
        })?;

        Ok(Intake::Accepted(AnonymousMessage { message }))
    }

    fn to_payload(&self, now: DateTime<Utc>) -> NotificationPayload {
        NotificationPayload::embed(
            Embed::new(TITLE, COLOR, now)
                .description(&self.message)
                .footer(FOOTER),
        )
    }
}
