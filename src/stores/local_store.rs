//! Local-only bookmark store for Placemark.
//!
//! The in-memory list is the canonical collection; a JSON file acts as a
//! passive durable mirror rewritten on every mutation. Reopening the
//! store loads the mirror, so bookmarks survive restarts without any
//! server.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::query;
use crate::stores::BookmarkStoreTrait;
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, BookmarkQuery};
use crate::types::errors::BookmarkError;

/// Bookmark store holding the canonical collection in memory, mirrored
/// to a JSON file on every change.
pub struct LocalStore {
    mirror_path: PathBuf,
    bookmarks: Vec<Bookmark>,
}

impl LocalStore {
    /// Opens a local store, loading any existing mirror file.
    ///
    /// A missing mirror means an empty collection; a malformed mirror is
    /// a storage error rather than silent data loss.
    pub fn open<P: AsRef<Path>>(mirror_path: P) -> Result<Self, BookmarkError> {
        let mirror_path = mirror_path.as_ref().to_path_buf();

        let bookmarks = if mirror_path.exists() {
            let content = fs::read_to_string(&mirror_path)
                .map_err(|e| BookmarkError::Storage(format!("Failed to read mirror: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| BookmarkError::Storage(format!("Failed to parse mirror: {}", e)))?
        } else {
            Vec::new()
        };

        Ok(Self {
            mirror_path,
            bookmarks,
        })
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Rewrites the mirror file from the in-memory collection.
    fn save_mirror(&self) -> Result<(), BookmarkError> {
        if let Some(parent) = self.mirror_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BookmarkError::Storage(format!("Failed to create mirror dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(&self.bookmarks)
            .map_err(|e| BookmarkError::Storage(format!("Failed to serialize mirror: {}", e)))?;

        fs::write(&self.mirror_path, json)
            .map_err(|e| BookmarkError::Storage(format!("Failed to write mirror: {}", e)))
    }

    fn find_index(&self, id: &str) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.id == id)
    }

    /// Number of records in the canonical collection.
    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

impl BookmarkStoreTrait for LocalStore {
    /// Recomputes the filtered/sorted view from the in-memory list.
    /// No I/O involved.
    fn list(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, BookmarkError> {
        Ok(query::apply(
            self.bookmarks.clone(),
            query.search.as_deref(),
            query.sort,
        ))
    }

    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        self.find_index(id)
            .map(|i| self.bookmarks[i].clone())
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    fn create(&mut self, draft: BookmarkDraft) -> Result<Bookmark, BookmarkError> {
        draft.validate()?;

        let record = Bookmark {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            url: draft.url,
            description: draft.description,
            category: draft.category,
            created_at: Self::now(),
        };

        self.bookmarks.push(record.clone());
        self.save_mirror()?;
        Ok(record)
    }

    fn update(&mut self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, BookmarkError> {
        let index = self
            .find_index(id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        let mut record = self.bookmarks[index].clone();
        patch.apply_to(&mut record);

        if record.title.trim().is_empty() {
            return Err(BookmarkError::Validation("title is required".to_string()));
        }

        self.bookmarks[index] = record.clone();
        self.save_mirror()?;
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> Result<(), BookmarkError> {
        let index = self
            .find_index(id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        self.bookmarks.remove(index);
        self.save_mirror()?;
        Ok(())
    }
}
