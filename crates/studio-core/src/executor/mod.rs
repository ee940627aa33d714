//! ============================================================================
//! Executor Module - Outbound integrations
//! ============================================================================
//! - GeminiClient: hosted chat model behind the assistant
//! - LogNotifier / ResendNotifier: booking confirmation e-mail
//! ============================================================================

mod email;
mod gemini;

pub use email::{
    long_date, notify_quietly, BookingConfirmation, LogNotifier, Notifier, ResendNotifier,
    CONFIRMATION_SUBJECT,
};
pub use gemini::{GeminiClient, DEFAULT_MODEL, SYSTEM_INSTRUCTION};
