//! HTTP-backed bookmark store for Placemark.
//!
//! Client-side adapter of the server-backed variant: every operation is
//! one blocking request against the REST API, and HTTP statuses are
//! translated back into the bookmark error taxonomy. Filtering and
//! sorting run server-side via the `search`/`sort` query parameters.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use crate::stores::BookmarkStoreTrait;
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, BookmarkQuery};
use crate::types::errors::BookmarkError;

/// Bookmark store that proxies CRUD calls to a Placemark server.
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    /// Creates a remote store for the given server base URL
    /// (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/bookmarks", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/api/bookmarks/{}", self.base_url, id)
    }

    /// Extracts the server's `{"message": ...}` body, falling back to the
    /// status code when the body is not in that shape.
    fn error_message(response: Response) -> String {
        let status = response.status();
        response
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| format!("HTTP {}", status))
    }

    /// Maps a non-success response to the error taxonomy.
    fn status_error(response: Response, id: Option<&str>) -> BookmarkError {
        match response.status() {
            StatusCode::NOT_FOUND => BookmarkError::NotFound(id.unwrap_or("?").to_string()),
            StatusCode::BAD_REQUEST => BookmarkError::Validation(Self::error_message(response)),
            _ => BookmarkError::Storage(Self::error_message(response)),
        }
    }

    fn parse_record(response: Response) -> Result<Bookmark, BookmarkError> {
        response
            .json::<Bookmark>()
            .map_err(|e| BookmarkError::Storage(format!("Malformed response: {}", e)))
    }
}

impl BookmarkStoreTrait for RemoteStore {
    fn list(&self, query: &BookmarkQuery) -> Result<Vec<Bookmark>, BookmarkError> {
        let mut request = self
            .client
            .get(self.collection_url())
            .query(&[("sort", query.sort.as_param())]);
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            request = request.query(&[("search", search)]);
        }

        let response = request
            .send()
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::status_error(response, None));
        }
        response
            .json::<Vec<Bookmark>>()
            .map_err(|e| BookmarkError::Storage(format!("Malformed response: {}", e)))
    }

    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        let response = self
            .client
            .get(self.record_url(id))
            .send()
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::status_error(response, Some(id)));
        }
        Self::parse_record(response)
    }

    fn create(&mut self, draft: BookmarkDraft) -> Result<Bookmark, BookmarkError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&draft)
            .send()
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;
        if response.status() != StatusCode::CREATED {
            return Err(Self::status_error(response, None));
        }
        Self::parse_record(response)
    }

    fn update(&mut self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, BookmarkError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(&patch)
            .send()
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::status_error(response, Some(id)));
        }
        Self::parse_record(response)
    }

    fn delete(&mut self, id: &str) -> Result<(), BookmarkError> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .map_err(|e| BookmarkError::Storage(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::status_error(response, Some(id)));
        }
        Ok(())
    }
}
