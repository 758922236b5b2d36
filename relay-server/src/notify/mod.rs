//! Outbound notifications.
//!
//! This module provides:
//! - Payload types for the webhook message body
//! - The [`Deliver`] seam and its HTTP implementation
//!
//! ```text
//! Submission → NotificationPayload → Deliver::deliver → webhook endpoint
//! ```

pub mod payload;
pub mod webhook;

pub use payload::{truncate, Embed, EmbedField, EmbedFooter, NotificationPayload};
pub use webhook::{Deliver, DeliveryError, RetryPolicy, WebhookClient};
