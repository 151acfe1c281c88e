//! SQLite-backed bookmark store for Placemark.
//!
//! Implements `BookmarkStoreTrait`: CRUD operations for bookmarks,
//! backed by SQLite via `rusqlite`. This is the backing store of the
//! server-backed variant.

use rusqlite::{params, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::query;
use crate::stores::BookmarkStoreTrait;
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, BookmarkQuery, Category};
use crate::types::errors::BookmarkError;

/// Bookmark store backed by a SQLite connection.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    /// Creates a new `SqliteStore` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads a single bookmark row into a struct. An unrecognized category
    /// label falls back to `Other` so the enum invariant holds.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        let category: String = row.get(4)?;
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            category: Category::from_label(&category).unwrap_or_default(),
            created_at: row.get(5)?,
        })
    }

    /// Loads every row in rowid (insertion) order, so the shared query
    /// engine sees the same natural enumeration order as the local store.
    fn load_all(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, url, description, category, created_at \
                 FROM bookmarks ORDER BY rowid",
            )
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| BookmarkError::Storage(e.to_string()))?);
        }
        Ok(results)
    }
}

impl BookmarkStoreTrait for SqliteStore<'_> {
    /// Lists bookmarks through the shared query engine.
    fn list(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, BookmarkError> {
        let records = self.load_all()?;
        Ok(query::apply(records, query.search.as_deref(), query.sort))
    }

    /// Fetches a single bookmark by ID.
    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, url, description, category, created_at \
                 FROM bookmarks WHERE id = ?1",
            )
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        let mut rows = stmt
            .query_map(params![id], Self::row_to_bookmark)
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        match rows.next() {
            Some(row) => row.map_err(|e| BookmarkError::Storage(e.to_string())),
            None => Err(BookmarkError::NotFound(id.to_string())),
        }
    }

    /// Validates the draft and inserts a new bookmark row.
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

        self.conn
            .execute(
                "INSERT INTO bookmarks (id, title, url, description, category, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.title,
                    record.url,
                    record.description,
                    record.category.label(),
                    record.created_at
                ],
            )
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        Ok(record)
    }

    /// Merges the patch onto the existing row and writes it back.
    ///
    /// `id` and `created_at` never change on update.
    fn update(&mut self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, BookmarkError> {
        let mut record = self.get(id)?;
        patch.apply_to(&mut record);

        if record.title.trim().is_empty() {
            return Err(BookmarkError::Validation("title is required".to_string()));
        }

        self.conn
            .execute(
                "UPDATE bookmarks SET title = ?1, url = ?2, description = ?3, category = ?4 \
                 WHERE id = ?5",
                params![
                    record.title,
                    record.url,
                    record.description,
                    record.category.label(),
                    record.id
                ],
            )
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        Ok(record)
    }

    /// Removes a bookmark row by ID.
    fn delete(&mut self, id: &str) -> Result<(), BookmarkError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
