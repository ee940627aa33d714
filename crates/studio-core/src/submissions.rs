//! ============================================================================
//! Submission Log - Append-only booking and inquiry collections
//! ============================================================================
//! `append` and `update_status` are load → modify → save over the whole
//! collection. Both run under the log's write lock, so the booking form and
//! the assistant sharing one `SubmissionLog` never lose each other's writes.
//! ============================================================================

use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::db::{keys, CollectionStore, KeyValueStore, RecordKind, SubmissionRecord};
use crate::error::SubmitError;

/// The two submission collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Bookings,
    Inquiries,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Bookings => keys::BOOKINGS,
            Self::Inquiries => keys::INQUIRIES,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Bookings => RecordKind::Booking,
            Self::Inquiries => RecordKind::Inquiry,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Bookings => "UNDERLA.STUDIO Bookings",
            Self::Inquiries => "AV & Broadcasting Inquiries",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bookings" | "booking" => Some(Self::Bookings),
            "inquiries" | "inquiry" => Some(Self::Inquiries),
            _ => None,
        }
    }
}

/// Shared handle over the submission collections of one store
pub struct SubmissionLog {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl SubmissionLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Full collection in stored (submission) order
    pub fn load(&self, collection: Collection) -> Result<Vec<SubmissionRecord>> {
        self.store.load(collection.key())
    }

    /// Overwrite the full collection
    pub fn save(&self, collection: Collection, records: &[SubmissionRecord]) -> Result<()> {
        let _guard = self.lock()?;
        self.store.save(collection.key(), records)
    }

    pub fn find(&self, collection: Collection, id: i64) -> Result<Option<SubmissionRecord>> {
        Ok(self.load(collection)?.into_iter().find(|r| r.id() == id))
    }

    /// Append one record. A colliding id is bumped past the current maximum;
    /// the stored record is returned.
    pub fn append(
        &self,
        collection: Collection,
        mut record: SubmissionRecord,
    ) -> std::result::Result<SubmissionRecord, SubmitError> {
        if record.kind() != collection.kind() {
            return Err(SubmitError::WrongKind {
                expected: collection.kind(),
                found: record.kind(),
            });
        }

        let _guard = self.lock().map_err(store_error)?;
        let mut records = self.load(collection).map_err(store_error)?;

        if records.iter().any(|r| r.id() == record.id()) {
            let next = records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
            debug!("Submission id {} taken, using {}", record.id(), next);
            record.set_id(next);
        }

        records.push(record.clone());
        self.store
            .save(collection.key(), &records)
            .map_err(store_error)?;

        info!("Stored {} {} ({} total)", collection.kind(), record.id(), records.len());
        Ok(record)
    }

    /// Change one record's status. Returns false when no record has `id`.
    /// Setting the current status again is a no-op rewrite.
    pub fn update_status(
        &self,
        collection: Collection,
        id: i64,
        status: &str,
    ) -> std::result::Result<bool, SubmitError> {
        let kind = collection.kind();
        if !kind.status_options().iter().any(|s| s.eq_ignore_ascii_case(status.trim())
            || s.replace(' ', "-").eq_ignore_ascii_case(status.trim()))
        {
            return Err(SubmitError::UnknownStatus {
                kind,
                status: status.to_string(),
                valid: kind.status_options().join(", "),
            });
        }

        let _guard = self.lock().map_err(store_error)?;
        let mut records = self.load(collection).map_err(store_error)?;

        let mut found = false;
        for record in records.iter_mut().filter(|r| r.id() == id) {
            found = record.set_status(status);
        }
        if !found {
            return Ok(false);
        }

        self.store
            .save(collection.key(), &records)
            .map_err(store_error)?;
        info!("{} {} status updated to {}", kind, id, status);
        Ok(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow!("Submission log lock poisoned"))
    }
}

fn store_error(e: anyhow::Error) -> SubmitError {
    SubmitError::Store(e.to_string())
}
