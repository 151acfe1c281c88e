//! Unit tests for the Placemark error types.
//!
//! Verifies that every error variant carries its context through the
//! `Display` implementation and behaves as a `std::error::Error`.

use placemark::types::errors::{BookmarkError, PreferencesError};

#[test]
fn test_bookmark_not_found_display_includes_id() {
    let err = BookmarkError::NotFound("abc-123".to_string());
    assert_eq!(err.to_string(), "Bookmark not found: abc-123");
}

#[test]
fn test_bookmark_validation_display_includes_reason() {
    let err = BookmarkError::Validation("title is required".to_string());
    assert_eq!(err.to_string(), "Invalid bookmark: title is required");
}

#[test]
fn test_bookmark_storage_display_includes_message() {
    let err = BookmarkError::Storage("disk full".to_string());
    assert_eq!(err.to_string(), "Bookmark storage error: disk full");
}

#[test]
fn test_preferences_errors_display() {
    let io = PreferencesError::Io("permission denied".to_string());
    assert_eq!(io.to_string(), "Preferences I/O error: permission denied");

    let ser = PreferencesError::Serialization("expected value".to_string());
    assert_eq!(
        ser.to_string(),
        "Preferences serialization error: expected value"
    );
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_e: &E) {}
    assert_error(&BookmarkError::NotFound("x".to_string()));
    assert_error(&PreferencesError::Io("x".to_string()));
}
