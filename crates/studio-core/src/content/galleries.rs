//! ============================================================================
//! Galleries - Photo galleries stored under `tag_galleries`
//! ============================================================================
//! Loading always merges in the default galleries that are missing and
//! writes the result back, so the studio page never renders without them.
//! ============================================================================

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use super::{check_image, data_url, store_error, MAX_IMAGE_BYTES};
use crate::db::{keys, CollectionStore, Gallery, GalleryImage, GalleryPage, KeyValueStore};
use crate::error::ContentError;

/// The galleries every install starts with
pub fn default_galleries(now: DateTime<Utc>) -> Vec<Gallery> {
    let gallery = |id: &str, name: &str, description: &str| Gallery {
        id: id.to_string(),
        name: name.to_string(),
        page: GalleryPage::Moes,
        description: Some(description.to_string()),
        images: Vec::new(),
        created_at: now,
    };

    vec![
        gallery(
            "gallery_weekly_showcase",
            "WEEKLY SHOWCASE",
            "Highlights from our weekly DJ live streams and showcase events.",
        ),
        gallery(
            "gallery_under_la",
            "UNDER LA",
            "Capturing the energy of our Monday Night Fundraiser community events.",
        ),
        gallery(
            "gallery_studio_sessions",
            "STUDIO SESSIONS",
            "Raw, unfiltered moments from recording and production blocks.",
        ),
    ]
}

pub struct GalleryService {
    store: Arc<dyn KeyValueStore>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All galleries, defaults merged in and persisted if missing
    pub fn list(&self, now: DateTime<Utc>) -> Result<Vec<Gallery>, ContentError> {
        let existed = self.store.contains(keys::GALLERIES).map_err(store_error)?;
        let mut galleries: Vec<Gallery> = self.store.load(keys::GALLERIES).map_err(store_error)?;

        let mut changed = false;
        for default in default_galleries(now) {
            if !galleries.iter().any(|g| g.id == default.id) {
                debug!("Restoring default gallery {}", default.id);
                galleries.push(default);
                changed = true;
            }
        }

        if changed || !existed {
            self.save(&galleries)?;
        }
        Ok(galleries)
    }

    pub fn get(&self, id: &str, now: DateTime<Utc>) -> Result<Gallery, ContentError> {
        self.list(now)?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| ContentError::GalleryNotFound(id.to_string()))
    }

    pub fn create(
        &self,
        name: &str,
        page: GalleryPage,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Gallery, ContentError> {
        let mut galleries = self.list(now)?;

        let mut id = now.timestamp_millis();
        while galleries.iter().any(|g| g.id == id.to_string()) {
            id += 1;
        }

        let gallery = Gallery {
            id: id.to_string(),
            name: name.to_string(),
            page,
            description: description.map(str::to_string),
            images: Vec::new(),
            created_at: now,
        };
        galleries.push(gallery.clone());
        self.save(&galleries)?;

        info!("Created gallery {} ({})", gallery.name, gallery.id);
        Ok(gallery)
    }

    /// Deleting an unknown id is a no-op. Defaults come back on the next load.
    pub fn delete(&self, id: &str, now: DateTime<Utc>) -> Result<bool, ContentError> {
        let mut galleries = self.list(now)?;
        let before = galleries.len();
        galleries.retain(|g| g.id != id);
        let removed = galleries.len() != before;
        self.save(&galleries)?;
        if removed {
            info!("Deleted gallery {}", id);
        }
        Ok(removed)
    }

    /// Add an uploaded image file to a gallery
    pub fn upload_image(
        &self,
        gallery_id: &str,
        file_name: &str,
        mime: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<GalleryImage, ContentError> {
        check_image(mime, bytes.len(), MAX_IMAGE_BYTES)?;

        let mut galleries = self.list(now)?;
        let gallery = galleries
            .iter_mut()
            .find(|g| g.id == gallery_id)
            .ok_or_else(|| ContentError::GalleryNotFound(gallery_id.to_string()))?;

        let mut id = now.timestamp_millis();
        while gallery.images.iter().any(|img| img.id == id.to_string()) {
            id += 1;
        }

        let image = GalleryImage {
            id: id.to_string(),
            url: data_url(mime, bytes),
            title: file_name.to_string(),
            uploaded_at: now,
        };
        gallery.images.push(image.clone());
        self.save(&galleries)?;

        info!("Uploaded {} to gallery {}", file_name, gallery_id);
        Ok(image)
    }

    pub fn delete_image(
        &self,
        gallery_id: &str,
        image_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ContentError> {
        let mut galleries = self.list(now)?;
        let gallery = galleries
            .iter_mut()
            .find(|g| g.id == gallery_id)
            .ok_or_else(|| ContentError::GalleryNotFound(gallery_id.to_string()))?;

        let before = gallery.images.len();
        gallery.images.retain(|img| img.id != image_id);
        let removed = gallery.images.len() != before;
        self.save(&galleries)?;
        Ok(removed)
    }

    fn save(&self, galleries: &[Gallery]) -> Result<(), ContentError> {
        self.store.save(keys::GALLERIES, galleries).map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    fn service() -> (Arc<MemoryStore>, GalleryService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), GalleryService::new(store))
    }

    #[test]
    fn test_first_load_seeds_defaults() {
        let (store, galleries) = service();
        let list = galleries.list(now()).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].name, "UNDER LA");
        assert!(store.contains(keys::GALLERIES).unwrap());
    }

    #[test]
    fn test_deleted_default_is_restored() {
        let (_, galleries) = service();
        assert!(galleries.delete("gallery_under_la", now()).unwrap());
        let ids: Vec<_> = galleries.list(now()).unwrap().into_iter().map(|g| g.id).collect();
        assert!(ids.contains(&"gallery_under_la".to_string()));
    }

    #[test]
    fn test_create_and_upload() {
        let (_, galleries) = service();
        let created = galleries
            .create("Launch Party", GalleryPage::Landing, None, now())
            .unwrap();
        assert_eq!(created.id, now().timestamp_millis().to_string());

        let image = galleries
            .upload_image(&created.id, "crowd.png", "image/png", b"png", now())
            .unwrap();
        assert!(image.url.starts_with("data:image/png;base64,"));

        let stored = galleries.get(&created.id, now()).unwrap();
        assert_eq!(stored.images, vec![image.clone()]);

        assert!(galleries.delete_image(&created.id, &image.id, now()).unwrap());
        assert!(galleries.get(&created.id, now()).unwrap().images.is_empty());
    }

    #[test]
    fn test_upload_to_missing_gallery() {
        let (_, galleries) = service();
        let err = galleries
            .upload_image("nope", "a.png", "image/png", b"x", now())
            .unwrap_err();
        assert_eq!(err, ContentError::GalleryNotFound("nope".into()));
    }

    #[test]
    fn test_upload_rejects_non_image() {
        let (_, galleries) = service();
        let err = galleries
            .upload_image("gallery_under_la", "a.txt", "text/plain", b"x", now())
            .unwrap_err();
        assert_eq!(err, ContentError::NotAnImage);
    }
}
