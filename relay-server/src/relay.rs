//! The forwarding pipeline shared by every submission variant.
//!
//! ```text
//! body → JSON → Submission::from_json → endpoint? → to_payload → deliver
//! ```

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info};

use crate::error::{RelayError, Result};
use crate::notify::{Deliver, DeliveryError};
use crate::submission::{Intake, Submission};

/// What happened to an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The payload was delivered to the webhook.
    Forwarded,
    /// The honeypot was filled; nothing was sent.
    Discarded,
}

/// Validate a raw body and forward it through `endpoint`.
///
/// At most one call to [`Deliver::deliver`] is made. Every failure is logged
/// here, so callers only need to map the error to a response.
pub async fn relay<S: Submission>(
    endpoint: Option<&dyn Deliver>,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<Outcome> {
    let kind = S::KIND;

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        error!(kind = %kind, body_length = body.len(), error = %e, "submission_malformed_body");
        RelayError::MalformedBody(e)
    })?;

    let submission = match S::from_json(&value) {
        Ok(Intake::Accepted(submission)) => submission,
        Ok(Intake::Honeypot) => {
            info!(kind = %kind, "submission_honeypot_discarded");
            return Ok(Outcome::Discarded);
        }
        Err(e) => {
            info!(kind = %kind, missing = ?e.missing, "submission_invalid");
            return Err(e.into());
        }
    };

    let Some(endpoint) = endpoint else {
        error!(kind = %kind, "webhook_not_configured");
        return Err(RelayError::NotConfigured(kind));
    };

    let payload = submission.to_payload(now);

    match endpoint.deliver(&payload).await {
        Ok(()) => {
            info!(kind = %kind, shape = payload.shape(), "submission_forwarded");
            Ok(Outcome::Forwarded)
        }
        Err(DeliveryError::Rejected { status, body }) => {
            error!(kind = %kind, status_code = status, response_body = %body, "webhook_rejected");
            Err(DeliveryError::Rejected { status, body }.into())
        }
        Err(e) => {
            error!(kind = %kind, error = ?e, "webhook_request_failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::notify::NotificationPayload;
    use crate::submission::{AnonymousMessage, ContactMessage, HireRequest, SubmissionKind};

    /// Records payloads and answers with a fixed status.
    struct Recorder {
        status: u16,
        calls: AtomicUsize,
        payloads: Mutex<Vec<NotificationPayload>>,
    }

    impl Recorder {
        fn new(status: u16) -> Self {
            Self {
                status,
                calls: AtomicUsize::new(0),
                payloads: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Deliver for Recorder {
        async fn deliver(&self, payload: &NotificationPayload) -> std::result::Result<(), DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads.lock().unwrap().push(payload.clone());
            if (200..300).contains(&self.status) {
                Ok(())
            } else {
                Err(DeliveryError::Rejected {
                    status: self.status,
                    body: "downstream says no".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_relay_forwards_once() {
        let recorder = Recorder::new(204);
        let outcome = relay::<AnonymousMessage>(Some(&recorder), br#"{"message":"hello"}"#, Utc::now())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Forwarded);
        assert_eq!(recorder.calls(), 1);
        assert_eq!(recorder.payloads.lock().unwrap()[0].shape(), "embed");
    }

    #[tokio::test]
    async fn test_relay_invalid_makes_no_call() {
        let recorder = Recorder::new(200);
        let err = relay::<ContactMessage>(Some(&recorder), b"{}", Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Validation(_)));
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    async fn test_relay_honeypot_makes_no_call() {
        let recorder = Recorder::new(200);
        let outcome = relay::<ContactMessage>(
            Some(&recorder),
            br#"{"name":"a","email":"b","message":"c","website":"x"}"#,
            Utc::now(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, Outcome::Discarded);
        assert_eq!(recorder.calls(), 0);
    }

    #[tokio::test]
    async fn test_relay_honeypot_without_endpoint_is_discarded() {
        let outcome = relay::<ContactMessage>(None, br#"{"website":"x"}"#, Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Discarded);
    }

    #[tokio::test]
    async fn test_relay_not_configured() {
        let err = relay::<HireRequest>(
            None,
            br#"{"name":"A","email":"a@b.com","project":"x"}"#,
            Utc::now(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RelayError::NotConfigured(SubmissionKind::Hire)));
    }

    #[tokio::test]
    async fn test_relay_validation_precedes_configuration() {
        let err = relay::<HireRequest>(None, br#"{"name":"A"}"#, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
    }

    #[tokio::test]
    async fn test_relay_rejected() {
        let recorder = Recorder::new(500);
        let err = relay::<AnonymousMessage>(Some(&recorder), br#"{"message":"hi"}"#, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RelayError::Delivery(DeliveryError::Rejected { status: 500, .. })
        ));
        assert_eq!(recorder.calls(), 1);
    }

    #[tokio::test]
    async fn test_relay_malformed_body() {
        let recorder = Recorder::new(200);
        let err = relay::<AnonymousMessage>(Some(&recorder), b"{not json", Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::MalformedBody(_)));
        assert_eq!(recorder.calls(), 0);
    }
}
