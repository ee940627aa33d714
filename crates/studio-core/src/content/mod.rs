//! ============================================================================
//! Content Module - Admin-managed media collections
//! ============================================================================
//! - GalleryService: named photo galleries (default set always present)
//! - ImageLibrary: uploaded images reused across the site
//! - FeaturedSessions: up to four audio sessions on the studio page
//!
//! Media is stored inline as base64 `data:` URLs.
//! ============================================================================

mod galleries;
mod images;
mod sessions;

pub use galleries::{default_galleries, GalleryService};
pub use images::{ImageLibrary, MAX_IMAGE_BYTES};
pub use sessions::{default_sessions, FeaturedSessions, NewSession, MAX_SESSIONS};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ContentError;

/// Encode raw bytes as a `data:<mime>;base64,...` URL
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Reject anything that is not an image or is over `max_bytes`
pub fn check_image(mime: &str, len: usize, max_bytes: usize) -> Result<(), ContentError> {
    if !mime.starts_with("image/") {
        return Err(ContentError::NotAnImage);
    }
    if len > max_bytes {
        return Err(ContentError::TooLarge(max_bytes / (1024 * 1024)));
    }
    Ok(())
}

/// Best-effort MIME type from a file name
pub fn mime_from_path(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// `candidate`, or one past the largest id when it is already taken
pub(crate) fn unique_id(existing: impl Iterator<Item = i64> + Clone, candidate: i64) -> i64 {
    if existing.clone().any(|id| id == candidate) {
        existing.max().unwrap_or(candidate) + 1
    } else {
        candidate
    }
}

fn store_error(e: anyhow::Error) -> ContentError {
    ContentError::Store(e.to_string())
}
