//! ============================================================================
//! Email Executor - Booking confirmations
//! ============================================================================
//! Two notifiers behind one trait:
//! - LogNotifier: renders the confirmation into the log (default)
//! - ResendNotifier: sends it through the Resend API
//! A booking never fails because its confirmation could not be sent; callers
//! go through `notify_quietly`, which logs and swallows errors.
//! ============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Resend API endpoint
const RESEND_API: &str = "https://api.resend.com/emails";

/// Subject line of every booking confirmation
pub const CONFIRMATION_SUBJECT: &str = "Your Booking Confirmation for UNDERLA.STUDIO";

/// What the customer is told about their booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub name: String,
    pub email: String,
    pub package_title: String,
    pub date: String,
    pub time: String,
}

impl BookingConfirmation {
    /// Plain-text confirmation body
    pub fn body(&self) -> String {
        format!(
            "Hi {},\n\n\
            This is a confirmation that your request for the \"{}\" package has been received.\n\
            Date: {}\n\
            Time: {}\n\n\
            Our team will be in touch shortly to finalize the details.\n\n\
            Thank you for booking with us!",
            self.name,
            self.package_title,
            long_date(&self.date),
            self.time
        )
    }
}

/// "2025-06-01" → "Sunday, June 1, 2025"; anything unparseable is returned as-is
pub fn long_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Confirmation delivery boundary
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_confirmation(&self, confirmation: &BookingConfirmation) -> Result<()>;
}

/// Send and never fail the caller
pub async fn notify_quietly(notifier: &dyn Notifier, confirmation: &BookingConfirmation) {
    if let Err(e) = notifier.send_confirmation(confirmation).await {
        warn!("Confirmation to {} not sent: {}", confirmation.email, e);
    }
}

/// Writes the confirmation to the log instead of sending it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_confirmation(&self, confirmation: &BookingConfirmation) -> Result<()> {
        info!(
            "Confirmation e-mail to {} | {}\n{}",
            confirmation.email,
            CONFIRMATION_SUBJECT,
            confirmation.body()
        );
        Ok(())
    }
}

/// Notifier backed by the Resend API
pub struct ResendNotifier {
    client: reqwest::Client,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl ResendNotifier {
    pub fn new(api_key: String, from_email: String, from_name: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from_email,
            from_name,
        }
    }

    /// Send a single plain-text email, returning the Resend message id
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String> {
        info!("Sending email to {}: {}", to, subject);

        let request = EmailRequest {
            from: format!("{} <{}>", self.from_name, self.from_email),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            text: Some(body.to_string()),
            html: None,
        };

        let response = self
            .client
            .post(RESEND_API)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Resend API error {}: {}", status, body));
        }

        let email_response: ResendResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse Resend response: {}", e))?;

        debug!("Email sent: {}", email_response.id);
        Ok(email_response.id)
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send_confirmation(&self, confirmation: &BookingConfirmation) -> Result<()> {
        self.send(&confirmation.email, CONFIRMATION_SUBJECT, &confirmation.body())
            .await
            .map(|_| ())
    }
}

// ============================================================================
// Resend API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct EmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}
