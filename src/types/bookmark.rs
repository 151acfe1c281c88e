use serde::{Deserialize, Serialize};

use crate::types::errors::BookmarkError;

/// The fixed set of categories a bookmark can belong to.
///
/// Unknown labels are rejected when deserializing, so a stored record's
/// category is always a member of this set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Beach,
    Shopping,
    Cafe,
    Travel,
    #[default]
    Other,
}

impl Category {
    /// The display label, also used for lexicographic category sorting
    /// and as the TEXT value stored in SQLite.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Beach => "Beach",
            Category::Shopping => "Shopping",
            Category::Cafe => "Cafe",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// Parses a stored label back into a `Category`.
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "Food" => Some(Category::Food),
            "Beach" => Some(Category::Beach),
            "Shopping" => Some(Category::Shopping),
            "Cafe" => Some(Category::Cafe),
            "Travel" => Some(Category::Travel),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Represents a saved bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    /// UNIX timestamp in seconds, assigned at creation and never changed.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Fields supplied when creating a bookmark. The store assigns `id`
/// and `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl BookmarkDraft {
    /// Checks the draft against the model rules: the title must be
    /// non-empty after trimming.
    pub fn validate(&self) -> Result<(), BookmarkError> {
        if self.title.trim().is_empty() {
            return Err(BookmarkError::Validation("title is required".to_string()));
        }
        Ok(())
    }
}

/// Partial update for an existing bookmark. Only supplied fields change;
/// `id` and `created_at` are immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
}

impl BookmarkPatch {
    /// Applies the patch onto an existing record, leaving `id` and
    /// `created_at` untouched.
    pub fn apply_to(&self, record: &mut Bookmark) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(url) = &self.url {
            record.url = Some(url.clone());
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(category) = self.category {
            record.category = category;
        }
    }
}

/// Sort order for bookmark listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// `created_at` descending, newest first. The default.
    #[default]
    Newest,
    /// Title, lexicographic ascending.
    Title,
    /// Category label, lexicographic ascending.
    Category,
}

impl SortKey {
    /// Parses the `sort` query parameter. Anything other than `title`
    /// or `category` means recency, matching the wire contract.
    pub fn from_param(param: &str) -> SortKey {
        match param {
            "title" => SortKey::Title,
            "category" => SortKey::Category,
            _ => SortKey::Newest,
        }
    }

    /// The query-parameter value for this key.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Newest => "createdAt",
            SortKey::Title => "title",
            SortKey::Category => "category",
        }
    }
}

/// Filter and sort settings for a listing call.
#[derive(Debug, Clone, Default)]
pub struct BookmarkQuery {
    /// Case-insensitive substring matched against title and description.
    /// `None` or empty means no filtering.
    pub search: Option<String>,
    pub sort: SortKey,
}

impl BookmarkQuery {
    pub fn new(search: Option<String>, sort: SortKey) -> Self {
        Self { search, sort }
    }
}
