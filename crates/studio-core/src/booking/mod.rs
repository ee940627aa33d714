//! ============================================================================
//! Booking Module - Studio package selection, pricing and submission
//! ============================================================================
//! - state: selection reducer (package, add-ons, contact fields)
//! - pricing: derived quote and total
//! - form: validation and submission into the booking log
//! ============================================================================

mod form;
mod pricing;
mod state;

pub use form::{booking_record, BookingForm};
pub use pricing::{addon_multiplier, total_price, Quote, ENGINEER_EST_HOURS, MUSICIAN_EST_HOURS};
pub use state::{reduce, BookingAction, BookingField, BookingState};
