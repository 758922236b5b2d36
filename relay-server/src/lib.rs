//! formrelay - Portfolio form relay.
//!
//! Receives form submissions from the portfolio site and forwards each one to
//! a chat webhook as a single best-effort POST.
//!
//! ## Architecture
//!
//! ```text
//! Browser → Web Server → relay (validate, format) → Deliver → Webhook
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod relay;
pub mod submission;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::RelayError;
pub use notify::{Deliver, DeliveryError, NotificationPayload, RetryPolicy, WebhookClient};
pub use relay::{relay, Outcome};
pub use submission::{
    AnonymousMessage, ContactMessage, HireRequest, Intake, Submission, SubmissionKind,
    ValidationError,
};
pub use web::{router, AppState, Endpoints};
