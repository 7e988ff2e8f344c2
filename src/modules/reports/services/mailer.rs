use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::MailConfig;
use crate::core::{AppError, Result};

/// Outcome of one delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Transport accepted the message
    Delivered,
    /// No credential configured; nothing was sent
    NotConfigured,
    /// Transport refused the message or the request failed
    Rejected,
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

/// Outbound transport for rendered reports
///
/// Implementations never return an error: every failure is folded into
/// `DeliveryStatus` and logged. Sending twice at most duplicates an email.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send(&self, recipients: &[String], subject: &str, html: &str) -> DeliveryStatus;

    /// Transport name for logs
    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    id: String,
}

/// Resend HTTP API client
pub struct ResendMailer {
    client: Client,
    api_key: Option<String>,
    from_address: String,
    base_url: String,
}

impl ResendMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build mail client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_email(
        &self,
        api_key: &str,
        recipients: &[String],
        subject: &str,
        html: &str,
    ) -> Result<String> {
        let url = format!("{}/emails", self.base_url);

        let request = ResendEmailRequest {
            from: &self.from_address,
            to: recipients,
            subject,
            html,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("Resend API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::delivery(format!(
                "Resend API error {}: {}",
                status, error_body
            )));
        }

        let body: ResendEmailResponse = response
            .json()
            .await
            .map_err(|e| AppError::delivery(format!("Failed to parse Resend response: {}", e)))?;

        Ok(body.id)
    }
}

#[async_trait]
impl ReportMailer for ResendMailer {
    async fn send(&self, recipients: &[String], subject: &str, html: &str) -> DeliveryStatus {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!(
                transport = self.name(),
                "RESEND_API_KEY not configured, skipping report delivery"
            );
            return DeliveryStatus::NotConfigured;
        };

        match self.post_email(api_key, recipients, subject, html).await {
            Ok(message_id) => {
                info!(
                    transport = self.name(),
                    message_id = %message_id,
                    recipients = recipients.len(),
                    "Report email accepted"
                );
                DeliveryStatus::Delivered
            }
            Err(e) => {
                error!(
                    transport = self.name(),
                    error = %e,
                    "Report email delivery failed"
                );
                DeliveryStatus::Rejected
            }
        }
    }

    fn name(&self) -> &str {
        "resend"
    }
}
