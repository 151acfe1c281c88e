//! Filter and sort for bookmark collections.
//!
//! Pure and deterministic: the same function runs inside `SqliteStore`
//! (server variant) and `LocalStore` (local variant), so listings behave
//! identically no matter where they execute.

use crate::types::bookmark::{Bookmark, SortKey};

/// Applies an optional case-insensitive substring filter, then sorts by
/// the given key.
///
/// The filter matches against title OR description as a plain substring,
/// never tokenized. The sort is stable: records that compare
/// equal keep the collection's natural enumeration order.
pub fn apply(mut records: Vec<Bookmark>, search: Option<&str>, sort: SortKey) -> Vec<Bookmark> {
    if let Some(needle) = search.filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        records.retain(|b| {
            b.title.to_lowercase().contains(&needle)
                || b.description.to_lowercase().contains(&needle)
        });
    }

    match sort {
        SortKey::Newest => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => records.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Category => {
            records.sort_by(|a, b| a.category.label().cmp(b.category.label()));
        }
    }

    records
}
