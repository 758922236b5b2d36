//! Discord-style webhook message bodies.
//!
//! A payload is either a plain `content` string or a list of embeds.
//! Reference: https://discord.com/developers/docs/resources/webhook#execute-webhook

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Character budget for an embed description.
pub const DESCRIPTION_LIMIT: usize = 4096;

/// Character budget for a single embed field value.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// JSON body posted to a webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    Text { content: String },
    Embeds { embeds: Vec<Embed> },
}

impl NotificationPayload {
    pub fn text(content: impl Into<String>) -> Self {
        NotificationPayload::Text {
            content: content.into(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        NotificationPayload::Embeds {
            embeds: vec![embed],
        }
    }

    /// Short label for logs.
    pub fn shape(&self) -> &'static str {
        match self {
            NotificationPayload::Text { .. } => "text",
            NotificationPayload::Embeds { .. } => "embed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// ISO-8601, millisecond precision, UTC.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32, at: DateTime<Utc>) -> Self {
        Embed {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            footer: None,
        }
    }

    /// Set the description, truncated to [`DESCRIPTION_LIMIT`].
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(truncate(text, DESCRIPTION_LIMIT));
        self
    }

    /// Append a field, its value truncated to [`FIELD_VALUE_LIMIT`].
    pub fn field(mut self, name: impl Into<String>, value: &str, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: truncate(value, FIELD_VALUE_LIMIT),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Cap `text` at `limit` characters, ending in [`ELLIPSIS`] when cut.
///
/// Length is counted in Unicode scalar values, so multi-byte text is never
/// split mid-character.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
