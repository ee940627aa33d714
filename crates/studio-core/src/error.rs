//! ============================================================================
//! Error Types - Domain failures surfaced to forms, admin and assistant
//! ============================================================================

use thiserror::Error;

use crate::db::RecordKind;

/// Booking / inquiry submission and status-change failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select a main package.")]
    NoPackageSelected,

    #[error("Selected package {0} is not in the catalog")]
    UnknownPackage(u32),

    #[error("{0} is an add-on. Please select a main package.")]
    AddonAsPackage(String),

    #[error("{0} is a main package and cannot be added as an add-on")]
    NotAnAddon(String),

    #[error("You must agree to the Terms and Cancellation Policy to book.")]
    TermsNotAccepted,

    #[error("Please fill in the required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown status '{status}' for a {kind}. Valid values: {valid}")]
    UnknownStatus {
        kind: RecordKind,
        status: String,
        valid: String,
    },

    #[error("A {found} record cannot be stored with {expected} records")]
    WrongKind { expected: RecordKind, found: RecordKind },

    /// Store read/write failed; the caller keeps its in-memory input
    #[error("Failed to save submission: {0}")]
    Store(String),
}

impl SubmitError {
    /// Validation failures block submission; everything else is a fault
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoPackageSelected
                | Self::UnknownPackage(_)
                | Self::AddonAsPackage(_)
                | Self::NotAnAddon(_)
                | Self::TermsNotAccepted
                | Self::MissingField(_)
        )
    }
}

/// Gallery, image library and featured-session failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Gallery not found: {0}")]
    GalleryNotFound(String),

    #[error("Invalid file type. Please select an image file.")]
    NotAnImage,

    #[error("File size exceeds {0}MB limit.")]
    TooLarge(usize),

    #[error("At most {0} featured sessions can be shown")]
    SessionLimit(usize),

    #[error("Featured session not found: {0}")]
    SessionNotFound(i64),

    #[error("Please select {0}.")]
    MissingMedia(&'static str),

    #[error("Storage error: {0}")]
    Store(String),
}

/// Assistant transport / protocol failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("Assistant not configured. Set GEMINI_API_KEY in .env")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Assistant API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed assistant response: {0}")]
    Malformed(String),

    #[error("Assistant requested too many tool calls")]
    TooManyToolRounds,
}
