//! ============================================================================
//! STUDIO-CORE: Booking and admin backend for TAG / UNDERLA.STUDIO
//! ============================================================================
//! - Package catalog, booking reducer and pricing
//! - Booking and inquiry submission into a redb-backed key-value store
//! - Admin review: filter, sort, paginate, status changes
//! - Galleries, image library and featured sessions
//! - Chat assistant with tool calling over the Gemini API
//! ============================================================================

pub mod admin;
pub mod assistant;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod executor;
pub mod inquiry;
pub mod submissions;
pub mod view;

// Re-export main types for convenience
pub use admin::{AdminQuery, Page, SortKey, StatusFilter, ITEMS_PER_PAGE};
pub use assistant::{ChatSession, ChatModel};
pub use booking::{BookingAction, BookingField, BookingForm, BookingState, Quote};
pub use catalog::{Catalog, Category, Package, PackageId};
pub use config::StudioConfig;
pub use db::{
    BookingRecord, BookingStatus, InquiryRecord, InquiryStatus, KeyValueStore, MemoryStore,
    ProjectType, StudioDb, SubmissionRecord,
};
pub use error::{AssistantError, ContentError, SubmitError};
pub use inquiry::InquiryForm;
pub use submissions::{Collection, SubmissionLog};
pub use view::View;
