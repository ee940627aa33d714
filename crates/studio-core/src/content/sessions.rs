//! ============================================================================
//! Featured Sessions - Audio showcase under `underla_featured_sessions`
//! ============================================================================
//! Display order is the stored order; admins reorder by moving one entry.
//! ============================================================================

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use super::{store_error, unique_id};
use crate::db::{keys, CollectionStore, FeaturedSession, KeyValueStore};
use crate::error::ContentError;

/// Most sessions the studio page shows
pub const MAX_SESSIONS: usize = 4;

/// Shown until an admin saves their own list
pub fn default_sessions() -> Vec<FeaturedSession> {
    vec![FeaturedSession {
        id: 1,
        artist: "The Wandering Souls".into(),
        title: "Riverstone".into(),
        description: "Acoustic track captured live off-the-floor with vintage ribbon mics to \
                      preserve warmth and intimacy."
            .into(),
        image_url: "/images/sessions/riverstone.jpg".into(),
        audio_url: None,
    }]
}

/// Add-session form
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub artist: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Audio file as a data URL
    pub audio_url: Option<String>,
}

pub struct FeaturedSessions {
    store: Arc<dyn KeyValueStore>,
}

impl FeaturedSessions {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored list, or the default showcase if never saved
    pub fn list(&self) -> Result<Vec<FeaturedSession>, ContentError> {
        if !self.store.contains(keys::FEATURED_SESSIONS).map_err(store_error)? {
            return Ok(default_sessions());
        }
        self.store.load(keys::FEATURED_SESSIONS).map_err(store_error)
    }

    pub fn add(&self, new: NewSession, now: DateTime<Utc>) -> Result<FeaturedSession, ContentError> {
        let mut sessions = self.list()?;
        if sessions.len() >= MAX_SESSIONS {
            return Err(ContentError::SessionLimit(MAX_SESSIONS));
        }
        let audio_url = match new.audio_url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ContentError::MissingMedia("an audio file")),
        };
        if new.image_url.trim().is_empty() {
            return Err(ContentError::MissingMedia("a session image"));
        }

        let session = FeaturedSession {
            id: unique_id(sessions.iter().map(|s| s.id), now.timestamp_millis()),
            artist: new.artist,
            title: new.title,
            description: new.description,
            image_url: new.image_url,
            audio_url: Some(audio_url),
        };
        sessions.push(session.clone());
        self.save(&sessions)?;

        info!("Added featured session {}", session.title);
        Ok(session)
    }

    /// Replace the session with the same id
    pub fn update(&self, session: FeaturedSession) -> Result<(), ContentError> {
        let mut sessions = self.list()?;
        let slot = sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or(ContentError::SessionNotFound(session.id))?;
        *slot = session;
        self.save(&sessions)
    }

    pub fn delete(&self, id: i64) -> Result<FeaturedSession, ContentError> {
        let mut sessions = self.list()?;
        let index = sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or(ContentError::SessionNotFound(id))?;
        let removed = sessions.remove(index);
        self.save(&sessions)?;

        info!("Deleted featured session {}", removed.title);
        Ok(removed)
    }

    /// Move the entry at `from` to position `to`. Returns false when nothing
    /// moved (same index or `from` out of range); `to` is clamped to the end.
    pub fn move_session(&self, from: usize, to: usize) -> Result<bool, ContentError> {
        let mut sessions = self.list()?;
        if from >= sessions.len() {
            return Ok(false);
        }
        let to = to.min(sessions.len() - 1);
        if from == to {
            return Ok(false);
        }

        let session = sessions.remove(from);
        sessions.insert(to, session);
        self.save(&sessions)?;
        Ok(true)
    }

    fn save(&self, sessions: &[FeaturedSession]) -> Result<(), ContentError> {
        self.store
            .save(keys::FEATURED_SESSIONS, sessions)
            .map_err(store_error)
    }
}
