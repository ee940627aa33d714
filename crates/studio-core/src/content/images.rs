//! ============================================================================
//! Image Library - Uploaded images under `tag_uploaded_images`
//! ============================================================================

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use super::{check_image, data_url, store_error, unique_id};
use crate::db::{keys, CollectionStore, ImageRecord, KeyValueStore};
use crate::error::ContentError;

/// Largest accepted upload
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub struct ImageLibrary {
    store: Arc<dyn KeyValueStore>,
}

impl ImageLibrary {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<ImageRecord>, ContentError> {
        self.store.load(keys::UPLOADED_IMAGES).map_err(store_error)
    }

    pub fn add(
        &self,
        name: &str,
        mime: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<ImageRecord, ContentError> {
        check_image(mime, bytes.len(), MAX_IMAGE_BYTES)?;

        let mut images = self.list()?;
        let record = ImageRecord {
            id: unique_id(images.iter().map(|i| i.id), now.timestamp_millis()),
            name: name.to_string(),
            data_url: data_url(mime, bytes),
        };
        images.push(record.clone());
        self.store
            .save(keys::UPLOADED_IMAGES, &images)
            .map_err(store_error)?;

        info!("Added image {} ({} bytes)", name, bytes.len());
        Ok(record)
    }

    pub fn delete(&self, id: i64) -> Result<bool, ContentError> {
        let mut images = self.list()?;
        let before = images.len();
        images.retain(|i| i.id != id);
        if images.len() == before {
            return Ok(false);
        }
        self.store
            .save(keys::UPLOADED_IMAGES, &images)
            .map_err(store_error)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_add_list_delete() {
        let library = ImageLibrary::new(Arc::new(MemoryStore::new()));
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let first = library.add("a.png", "image/png", b"a", now).unwrap();
        let second = library.add("b.png", "image/png", b"b", now).unwrap();
        assert_eq!(first.id, 1_700_000_000_000);
        assert_eq!(second.id, 1_700_000_000_001);
        assert_eq!(library.list().unwrap().len(), 2);

        assert!(library.delete(first.id).unwrap());
        assert!(!library.delete(first.id).unwrap());
        assert_eq!(library.list().unwrap(), vec![second]);
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let library = ImageLibrary::new(Arc::new(MemoryStore::new()));
        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = library.add("huge.jpg", "image/jpeg", &big, Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 5MB limit.");
        assert!(library.list().unwrap().is_empty());
    }
}
