//! ============================================================================
//! Inquiry Form - AV & broadcasting project inquiries
//! ============================================================================

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::db::{InquiryRecord, InquiryStatus, ProjectType, RecordKind, SubmissionRecord};
use crate::error::SubmitError;
use crate::submissions::{Collection, SubmissionLog};

/// Inquiry form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
    pub company: String,
    pub name: String,
    pub email: String,
    pub project_type: ProjectType,
    pub description: String,
}

impl InquiryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), SubmitError> {
        let required = [
            ("company", &self.company),
            ("name", &self.name),
            ("email", &self.email),
            ("description", &self.description),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(SubmitError::MissingField(label));
            }
        }
        Ok(())
    }

    pub fn to_record(&self, now: DateTime<Utc>) -> InquiryRecord {
        InquiryRecord {
            id: now.timestamp_millis(),
            submitted_at: now,
            status: InquiryStatus::New,
            company: self.company.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            project_type: self.project_type,
            description: self.description.clone(),
        }
    }

    /// Validate, append to the inquiry log and clear the form
    pub fn submit(&mut self, log: &SubmissionLog, now: DateTime<Utc>) -> Result<InquiryRecord, SubmitError> {
        if let Err(e) = self.validate() {
            warn!("Inquiry blocked: {}", e);
            return Err(e);
        }

        let record = SubmissionRecord::Inquiry(self.to_record(now));
        let SubmissionRecord::Inquiry(stored) = log.append(Collection::Inquiries, record)? else {
            return Err(SubmitError::WrongKind {
                expected: RecordKind::Inquiry,
                found: RecordKind::Booking,
            });
        };

        info!("Inquiry {} submitted by {}", stored.id, stored.company);
        *self = Self::default();
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn form() -> InquiryForm {
        InquiryForm {
            company: "Northside Arena".into(),
            name: "Priya".into(),
            email: "priya@northside.test".into(),
            project_type: ProjectType::LiveEvents,
            description: "LED wall and stage audio for a 3-day festival".into(),
        }
    }

    #[test]
    fn test_default_project_type() {
        assert_eq!(InquiryForm::new().project_type, ProjectType::BroadcastProduction);
    }

    #[test]
    fn test_missing_description_blocks() {
        let log = SubmissionLog::new(Arc::new(MemoryStore::new()));
        let mut form = form();
        form.description.clear();
        let err = form.submit(&log, Utc::now()).unwrap_err();
        assert_eq!(err, SubmitError::MissingField("description"));
        assert!(log.load(Collection::Inquiries).unwrap().is_empty());
        assert_eq!(form.company, "Northside Arena");
    }

    #[test]
    fn test_submit_stores_new_inquiry() {
        let log = SubmissionLog::new(Arc::new(MemoryStore::new()));
        let now = Utc.with_ymd_and_hms(2025, 5, 2, 16, 0, 0).unwrap();
        let mut form = form();

        let stored = form.submit(&log, now).unwrap();
        assert_eq!(stored.status, InquiryStatus::New);
        assert_eq!(stored.project_type, ProjectType::LiveEvents);
        assert_eq!(form, InquiryForm::default());

        let records = log.load(Collection::Inquiries).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].headline(), "Live Events & Staging");
    }
}
