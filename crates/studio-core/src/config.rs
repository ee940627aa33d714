//! ============================================================================
//! Configuration - Environment-driven settings
//! ============================================================================
//! Read from the process environment (load `.env` first with dotenvy):
//!   GEMINI_API_KEY, GEMINI_MODEL, STUDIO_DB_PATH,
//!   RESEND_API_KEY, EMAIL_FROM_ADDRESS, EMAIL_FROM_NAME
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::assistant::ChatModel;
use crate::error::AssistantError;
use crate::executor::{GeminiClient, LogNotifier, Notifier, ResendNotifier};

const DEFAULT_FROM_NAME: &str = "UNDERLA.STUDIO";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub db_path: Option<String>,
    pub resend_api_key: Option<String>,
    pub email_from_address: Option<String>,
    pub email_from_name: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: env("GEMINI_API_KEY"),
            gemini_model: env("GEMINI_MODEL"),
            db_path: env("STUDIO_DB_PATH"),
            resend_api_key: env("RESEND_API_KEY"),
            email_from_address: env("EMAIL_FROM_ADDRESS"),
            email_from_name: env("EMAIL_FROM_NAME"),
        }
    }
}

/// Unset and blank variables both read as None
fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl StudioConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Resend when a key and sender are configured, otherwise the log
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        match (&self.resend_api_key, &self.email_from_address) {
            (Some(key), Some(from)) => {
                debug!("Using Resend for booking confirmations");
                Arc::new(ResendNotifier::new(
                    key.clone(),
                    from.clone(),
                    self.email_from_name
                        .clone()
                        .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
                ))
            }
            _ => Arc::new(LogNotifier),
        }
    }

    pub fn chat_model(&self) -> Result<Arc<dyn ChatModel>, AssistantError> {
        let key = self
            .gemini_api_key
            .clone()
            .ok_or(AssistantError::NotConfigured)?;
        Ok(Arc::new(GeminiClient::new(key, self.gemini_model.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> StudioConfig {
        StudioConfig {
            gemini_api_key: None,
            gemini_model: None,
            db_path: None,
            resend_api_key: None,
            email_from_address: None,
            email_from_name: None,
        }
    }

    #[test]
    fn test_chat_model_requires_key() {
        assert_eq!(empty().chat_model().err(), Some(AssistantError::NotConfigured));

        let config = StudioConfig {
            gemini_api_key: Some("key".into()),
            ..empty()
        };
        assert!(config.chat_model().is_ok());
    }

    #[tokio::test]
    async fn test_notifier_falls_back_to_log() {
        let config = StudioConfig {
            resend_api_key: Some("re_123".into()),
            ..empty()
        };
        // no sender address
        let notifier = config.notifier();
        let confirmation = crate::executor::BookingConfirmation {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            package_title: "Drum Tracking".into(),
            date: "2025-06-01".into(),
            time: "14:00".into(),
        };
        assert!(notifier.send_confirmation(&confirmation).await.is_ok());
    }
}
