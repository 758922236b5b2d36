//! Hire requests from the "hire me" dialog.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::fields;
use super::{Intake, Submission, SubmissionKind, ValidationError};
use crate::notify::{Embed, NotificationPayload};

const TITLE: &str = "💼 New Hire Request";
const COLOR: u32 = 0x5b8cff;
const FOOTER: &str = "Portfolio Hire Request";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HireRequest {
    pub name: String,
    pub email: String,
    pub project: String,
    pub budget: Option<String>,
}

impl Submission for HireRequest {
    const KIND: SubmissionKind = SubmissionKind::Hire;

    fn from_fields(body: &Map<String, Value>) -> Result<Intake<Self>, ValidationError> {
        let [name, email, project] = fields::required(body, ["name", "email", "project"])
            .map_err(|missing| ValidationError {
                kind: Self::KIND,
                missing,
            })?;

        Ok(Intake::Accepted(HireRequest {
            name,
            email,
            project,
            budget: fields::loose_text(body, "budget"),
        }))
    }

    fn to_payload(&self, now: DateTime<Utc>) -> NotificationPayload {
        let mut embed = Embed::new(TITLE, COLOR, now)
            .field("👤 Client Name", &self.name, true)
            .field("📧 Email", &self.email, true)
            .field("📝 Project Brief", &self.project, false);

        if let Some(budget) = &self.budget {
            embed = embed.field("💰 Budget Range", budget, true);
        }

        NotificationPayload::embed(embed.footer(FOOTER))
    }
}
