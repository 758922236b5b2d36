//! HTTP delivery of notification payloads.
//!
//! One POST per payload. Retries are off unless configured, and even then
//! only connection failures are retried: the endpoint never saw the request,
//! so a submission is still forwarded at most once.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::payload::NotificationPayload;

/// Failure to hand a payload to the webhook endpoint.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The endpoint answered with a non-2xx status.
    #[error("webhook responded with status {status}")]
    Rejected { status: u16, body: String },

    /// Network, TLS or protocol failure before a status was received.
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can deliver a notification payload.
#[async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), DeliveryError>;
}

/// Bounded retry for connection failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): exponential backoff
    /// plus up to one `base_delay` of jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let backoff_ms = base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(16));
        let jitter_ms = rand::thread_rng().gen_range(0..=base_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms))
    }
}

/// Posts payloads to one webhook URL.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: Url,
    retry: RetryPolicy,
}

impl WebhookClient {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Host of the endpoint. The full URL carries a token and is not logged.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("unknown")
    }
}

#[async_trait]
impl Deliver for WebhookClient {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), DeliveryError> {
        let mut attempt = 0u32;

        loop {
            debug!(
                host = self.host(),
                attempt = attempt + 1,
                shape = payload.shape(),
                "webhook_post_starting"
            );

            match self.client.post(self.url.clone()).json(payload).send().await {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_success() {
                        debug!(host = self.host(), status_code = status.as_u16(), "webhook_post_complete");
                        return Ok(());
                    }

                    let body = resp.text().await.unwrap_or_default();
                    return Err(DeliveryError::Rejected {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) if e.is_connect() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        host = self.host(),
                        attempt = attempt,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "webhook_connect_retry"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(DeliveryError::Transport(e)),
            }
        }
    }
}
