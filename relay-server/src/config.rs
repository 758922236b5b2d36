//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup. A missing webhook URL is a valid state:
//! the matching route answers with a "not configured" error instead of failing
//! to boot.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::submission::SubmissionKind;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Webhook receiving contact form submissions
    pub contact_webhook_url: Option<Url>,

    /// Webhook receiving anonymous messages
    pub anon_webhook_url: Option<Url>,

    /// Webhook receiving hire requests
    pub hire_webhook_url: Option<Url>,

    /// Outbound request timeout in milliseconds (none when unset)
    pub webhook_timeout_ms: Option<u64>,

    /// Extra attempts after a connection failure (0 disables retry)
    pub webhook_max_retries: u32,

    /// Base delay between retry attempts in milliseconds
    pub webhook_retry_base_delay_ms: u64,

    /// Address quoted to hire-request callers when delivery fails
    pub contact_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            contact_webhook_url: None,
            anon_webhook_url: None,
            hire_webhook_url: None,
            webhook_timeout_ms: None,
            webhook_max_retries: 0,
            webhook_retry_base_delay_ms: 250,
            contact_email: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: parse_number("PORT").unwrap_or(defaults.port),

            contact_webhook_url: parse_url("DISCORD_WEBHOOK_URL"),

            anon_webhook_url: parse_url("DISCORD_ANON_WEBHOOK_URL"),

            hire_webhook_url: parse_url("DISCORD_HIRE_ME_WEBHOOK_URL"),

            webhook_timeout_ms: parse_number::<u64>("WEBHOOK_TIMEOUT_MS").filter(|ms| *ms > 0),

            webhook_max_retries: parse_number("WEBHOOK_MAX_RETRIES")
                .unwrap_or(defaults.webhook_max_retries),

            webhook_retry_base_delay_ms: parse_number("WEBHOOK_RETRY_BASE_DELAY_MS")
                .unwrap_or(defaults.webhook_retry_base_delay_ms),

            contact_email: parse_text("CONTACT_EMAIL"),
        }
    }

    /// Webhook URL configured for a submission kind, if any.
    pub fn webhook_url(&self, kind: SubmissionKind) -> Option<&Url> {
        match kind {
            SubmissionKind::Contact => self.contact_webhook_url.as_ref(),
            SubmissionKind::Anonymous => self.anon_webhook_url.as_ref(),
            SubmissionKind::Hire => self.hire_webhook_url.as_ref(),
        }
    }

    pub fn webhook_timeout(&self) -> Option<Duration> {
        self.webhook_timeout_ms.map(Duration::from_millis)
    }
}

/// Parse an absolute http(s) URL. Blank values count as unset.
fn parse_url(name: &str) -> Option<Url> {
    let raw = parse_text(name)?;

    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(env_var = name, scheme = url.scheme(), "Unsupported webhook scheme, treating as unset");
            None
        }
        Err(e) => {
            // The value embeds a webhook token, so only the parse error is logged.
            warn!(env_var = name, error = %e, "Invalid webhook URL, treating as unset");
            None
        }
    }
}

/// Parse a numeric variable. Unparsable values are reported and ignored.
fn parse_number<T: FromStr>(name: &str) -> Option<T> {
    let raw = parse_text(name)?;

    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            None
        }
    }
}

/// Read a variable, trimming it and mapping blank values to `None`.
fn parse_text(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|v| !v.is_empty())
}
