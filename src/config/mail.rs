//! Email transport configuration.

use std::env;
use std::time::Duration;

use crate::core::Result;

use super::env_or;

pub const DEFAULT_FROM_ADDRESS: &str = "Reports <reports@reportflow.app>";
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

/// Settings for the outbound report mailer.
///
/// A missing `api_key` is a valid runtime state: deliveries are skipped and
/// reported as failures so `last_sent_at` never advances.
#[derive(Clone)]
pub struct MailConfig {
    /// Resend API key (optional).
    pub api_key: Option<String>,

    /// Sender, either `addr@host` or `Name <addr@host>`.
    pub from_address: String,

    /// Transport base URL.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            base_url: DEFAULT_RESEND_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("from_address", &self.from_address)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("RESEND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            api_key,
            from_address: env::var("REPORT_FROM_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            base_url: env::var("RESEND_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_RESEND_BASE_URL.to_string()),
            timeout_secs: env_or("MAIL_TIMEOUT_SECS", 15)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the mail configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !looks_like_email(sender_address(&self.from_address)) {
            return Err("REPORT_FROM_ADDRESS must be a valid email address".to_string());
        }

        if self.base_url.trim().is_empty() {
            return Err("RESEND_BASE_URL must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("MAIL_TIMEOUT_SECS must be >= 1".to_string());
        }

        Ok(())
    }
}

/// Extract `addr@host` from `Name <addr@host>`.
fn sender_address(from: &str) -> &str {
    match (from.find('<'), from.rfind('>')) {
        (Some(start), Some(end)) if start < end => &from[start + 1..end],
        _ => from,
    }
}

pub(crate) fn looks_like_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    let mut parts = trimmed.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if parts.next().is_some() {
        return false;
    }

    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
