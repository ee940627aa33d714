// ============================================================================
// StudioDb - Embedded Key-Value Store (redb)
// ============================================================================
// Every logical collection is one JSON array under a named key, read and
// rewritten whole. Default path: ~/.tag-studio/studio.redb (override via
// STUDIO_DB_PATH env var).
// ============================================================================

mod memory;
pub mod types;

pub use memory::MemoryStore;
pub use types::{
    BookingRecord, BookingStatus, DbStats, FeaturedSession, Gallery, GalleryImage, GalleryPage,
    ImageRecord, InquiryRecord, InquiryStatus, ProjectType, RecordKind, SubmissionRecord,
};

use anyhow::{anyhow, Result};
use redb::{Database, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Collection keys (one JSON array each)
pub mod keys {
    pub const BOOKINGS: &str = "underla_bookings";
    pub const INQUIRIES: &str = "av_inquiries";
    pub const FEATURED_SESSIONS: &str = "underla_featured_sessions";
    pub const UPLOADED_IMAGES: &str = "tag_uploaded_images";
    pub const GALLERIES: &str = "tag_galleries";

    pub const ALL: [&str; 5] = [BOOKINGS, INQUIRIES, FEATURED_SESSIONS, UPLOADED_IMAGES, GALLERIES];
}

// Table definitions
const COLLECTIONS: TableDefinition<&str, &str> = TableDefinition::new("collections");

/// Raw string storage by key. Implementations must be shareable across the
/// form path and the assistant path.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Typed whole-collection access on top of any [`KeyValueStore`]
pub trait CollectionStore: KeyValueStore {
    /// Persisted collection for `key`, empty if never written
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.get(key)? {
            Some(raw) => {
                let records: Vec<T> = serde_json::from_str(&raw)
                    .map_err(|e| anyhow!("Failed to deserialize {}: {}", key, e))?;
                debug!("Loaded {} records from {}", records.len(), key);
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the whole collection; last writer wins
    fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", key, e))?;
        self.set(key, &raw)?;
        debug!("Saved {} records to {}", records.len(), key);
        Ok(())
    }

    /// Whether `key` has ever been written
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> CollectionStore for S {}

/// Embedded database for the studio
pub struct StudioDb {
    db: Database,
    path: PathBuf,
}

impl StudioDb {
    /// Open (or create) the database at the given path.
    /// If `path` is None, uses STUDIO_DB_PATH env var or ~/.tag-studio/studio.redb
    pub fn open(path: Option<&str>) -> Result<Self> {
        let db_path = if let Some(p) = path {
            PathBuf::from(p)
        } else if let Ok(env_path) = std::env::var("STUDIO_DB_PATH") {
            PathBuf::from(env_path)
        } else {
            default_db_path()?
        };

        Self::open_at(&db_path)
    }

    /// Open (or create) the database at an explicit path
    pub fn open_at(db_path: &Path) -> Result<Self> {
        info!("Opening database at: {}", db_path.display());

        let db = Database::create(db_path)
            .map_err(|e| anyhow!("Failed to open database: {}", e))?;

        // Ensure the table exists by doing a write transaction
        let write_txn = db
            .begin_write()
            .map_err(|e| anyhow!("Failed to begin write: {}", e))?;
        {
            let _ = write_txn
                .open_table(COLLECTIONS)
                .map_err(|e| anyhow!("Failed to create collections table: {}", e))?;
        }
        write_txn.commit().map_err(|e| anyhow!("Failed to commit init: {}", e))?;

        info!("Database ready");

        Ok(Self {
            db,
            path: db_path.to_path_buf(),
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove a collection entirely. Returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()
            .map_err(|e| anyhow!("Failed to begin write: {}", e))?;
        let removed;
        {
            let mut table = write_txn.open_table(COLLECTIONS)
                .map_err(|e| anyhow!("Failed to open collections table: {}", e))?;
            removed = table.remove(key)
                .map_err(|e| anyhow!("Failed to remove {}: {}", key, e))?
                .is_some();
        }
        write_txn.commit().map_err(|e| anyhow!("Failed to commit delete: {}", e))?;

        if removed {
            debug!("Deleted collection: {}", key);
        }
        Ok(removed)
    }
}

impl KeyValueStore for StudioDb {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()
            .map_err(|e| anyhow!("Failed to begin read: {}", e))?;
        let table = read_txn.open_table(COLLECTIONS)
            .map_err(|e| anyhow!("Failed to open collections table: {}", e))?;

        match table.get(key).map_err(|e| anyhow!("Failed to get {}: {}", key, e))? {
            Some(value) => Ok(Some(value.value().to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self.db.begin_write()
            .map_err(|e| anyhow!("Failed to begin write: {}", e))?;
        {
            let mut table = write_txn.open_table(COLLECTIONS)
                .map_err(|e| anyhow!("Failed to open collections table: {}", e))?;
            table.insert(key, value)
                .map_err(|e| anyhow!("Failed to write {}: {}", key, e))?;
        }
        write_txn.commit().map_err(|e| anyhow!("Failed to commit: {}", e))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let read_txn = self.db.begin_read()
            .map_err(|e| anyhow!("Failed to begin read: {}", e))?;
        let table = read_txn.open_table(COLLECTIONS)
            .map_err(|e| anyhow!("Failed to open collections table: {}", e))?;

        let mut results = Vec::new();
        let iter = table.range::<&str>(..)
            .map_err(|e| anyhow!("Failed to iterate collections: {}", e))?;
        for entry in iter {
            let (key, _value) = entry.map_err(|e| anyhow!("Failed to read entry: {}", e))?;
            results.push(key.value().to_string());
        }
        Ok(results)
    }
}

fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
    let studio_dir = home.join(".tag-studio");
    std::fs::create_dir_all(&studio_dir)
        .map_err(|e| anyhow!("Failed to create .tag-studio directory: {}", e))?;
    Ok(studio_dir.join("studio.redb"))
}

// ============================================================================
// Statistics
// ============================================================================

/// Counts across every collection in the store
pub fn stats<S: KeyValueStore + ?Sized>(store: &S) -> Result<DbStats> {
    let bookings: Vec<SubmissionRecord> = store.load(keys::BOOKINGS)?;
    let inquiries: Vec<SubmissionRecord> = store.load(keys::INQUIRIES)?;
    let images: Vec<ImageRecord> = store.load(keys::UPLOADED_IMAGES)?;
    let galleries: Vec<Gallery> = store.load(keys::GALLERIES)?;
    let sessions: Vec<FeaturedSession> = store.load(keys::FEATURED_SESSIONS)?;

    Ok(DbStats {
        total_bookings: bookings.len(),
        booking_counts: count_by_status(&bookings),
        total_inquiries: inquiries.len(),
        inquiry_counts: count_by_status(&inquiries),
        total_images: images.len(),
        total_galleries: galleries.len(),
        total_featured_sessions: sessions.len(),
    })
}

/// Number of records per status label
pub fn count_by_status(records: &[SubmissionRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status_label().to_string()).or_insert(0usize) += 1;
    }
    counts
}
