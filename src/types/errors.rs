use std::fmt;

// === BookmarkError ===

/// Errors produced by bookmark store operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// The record failed model validation (e.g. empty title).
    Validation(String),
    /// The backing store failed or was unreachable.
    Storage(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::Validation(msg) => write!(f, "Invalid bookmark: {}", msg),
            BookmarkError::Storage(msg) => write!(f, "Bookmark storage error: {}", msg),
        }
    }
}

impl std::error::Error for BookmarkError {}

// === PreferencesError ===

/// Errors related to the preferences file.
#[derive(Debug)]
pub enum PreferencesError {
    /// An I/O error occurred while reading or writing preferences.
    Io(String),
    /// Failed to serialize or deserialize preferences.
    Serialization(String),
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferencesError::Io(msg) => write!(f, "Preferences I/O error: {}", msg),
            PreferencesError::Serialization(msg) => {
                write!(f, "Preferences serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreferencesError {}
