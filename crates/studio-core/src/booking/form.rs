//! ============================================================================
//! Booking Form - Validation and submission of a studio booking
//! ============================================================================
//! Checks run in a fixed order: package (a main package, add-ons only in the
//! add-on set), terms, then required contact fields.
//! A blocked submission never touches the store. On success the selection and
//! the terms flag are cleared; on a store failure both are kept so the user
//! can retry.
//! ============================================================================

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::state::{BookingAction, BookingState};
use crate::catalog::{Catalog, Package};
use crate::db::{BookingRecord, BookingStatus, RecordKind, SubmissionRecord};
use crate::error::SubmitError;
use crate::submissions::{Collection, SubmissionLog};

/// Booking form: selection state plus the terms checkbox
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub state: BookingState,
    pub agreed_to_terms: bool,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: BookingAction) {
        self.state.apply(action);
    }

    pub fn set_agreed(&mut self, agreed: bool) {
        self.agreed_to_terms = agreed;
    }

    /// Cancel: back to an empty form
    pub fn clear(&mut self) {
        self.state.reset();
        self.agreed_to_terms = false;
    }

    /// Check the form without submitting
    pub fn validate<'a>(&self, catalog: &'a Catalog) -> Result<&'a Package, SubmitError> {
        let package_id = self.state.package_id.ok_or(SubmitError::NoPackageSelected)?;
        let package = catalog
            .get(package_id)
            .ok_or(SubmitError::UnknownPackage(package_id))?;
        if package.is_addon() {
            return Err(SubmitError::AddonAsPackage(package.title.clone()));
        }
        for id in &self.state.addon_ids {
            let addon = catalog.get(*id).ok_or(SubmitError::UnknownPackage(*id))?;
            if !addon.is_addon() {
                return Err(SubmitError::NotAnAddon(addon.title.clone()));
            }
        }

        if !self.agreed_to_terms {
            return Err(SubmitError::TermsNotAccepted);
        }

        let required = [
            ("name", &self.state.name),
            ("email", &self.state.email),
            ("date", &self.state.date),
            ("time", &self.state.time),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(SubmitError::MissingField(label));
            }
        }

        Ok(package)
    }

    /// Validate, append to the booking log and reset the form
    pub fn submit(
        &mut self,
        catalog: &Catalog,
        log: &SubmissionLog,
        now: DateTime<Utc>,
    ) -> Result<BookingRecord, SubmitError> {
        let package = self.validate(catalog).map_err(|e| {
            warn!("Booking blocked: {}", e);
            e
        })?;

        let record = booking_record(package, &self.state, now);
        let SubmissionRecord::Booking(stored) =
            log.append(Collection::Bookings, SubmissionRecord::Booking(record))?
        else {
            return Err(SubmitError::WrongKind {
                expected: RecordKind::Booking,
                found: RecordKind::Inquiry,
            });
        };

        info!("Booking {} submitted for {}", stored.id, stored.package_title);
        self.clear();
        Ok(stored)
    }
}

/// Pending booking record for `package` from the current selection
pub fn booking_record(package: &Package, state: &BookingState, now: DateTime<Utc>) -> BookingRecord {
    BookingRecord {
        id: now.timestamp_millis(),
        submitted_at: now,
        status: BookingStatus::Pending,
        package_id: package.id,
        addon_ids: state.addon_list(),
        date: state.date.clone(),
        time: state.time.clone(),
        name: state.name.clone(),
        email: state.email.clone(),
        project_details: state.project_details.clone(),
        package_title: package.title.clone(),
        package_price: package.price_display.clone(),
    }
}
