// Placemark store adapters
// Each adapter implements the same CRUD contract over a different backing
// store, so the server-backed and local-only variants are interchangeable
// at composition time.

pub mod local_store;
pub mod remote_store;
pub mod sqlite_store;

use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, BookmarkQuery};
use crate::types::errors::BookmarkError;

/// Trait defining the bookmark persistence contract.
///
/// The store is the sole authority for the canonical record collection;
/// callers hold derived copies refreshed through `list`.
pub trait BookmarkStoreTrait {
    /// Lists bookmarks, filtered and sorted per the query.
    fn list(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Fetches a single bookmark by ID.
    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError>;
    /// Validates the draft, assigns `id` and `created_at`, and stores the record.
    fn create(&mut self, draft: BookmarkDraft) -> Result<Bookmark, BookmarkError>;
    /// Merges the patch onto the existing record. The merged record must
    /// still pass title validation.
    fn update(&mut self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, BookmarkError>;
    /// Removes a bookmark. Its ID is invalid for future lookups.
    fn delete(&mut self, id: &str) -> Result<(), BookmarkError>;
}
