//! Unit tests for the client state controller.
//!
//! Runs the `App` over a real `LocalStore` (tempdir-backed) for the
//! happy paths and a failing store double for the fault paths.

use std::time::{Duration, Instant};

use tempfile::TempDir;

use placemark::app::{App, Dialog, LoadState, ToastKind, TOAST_DURATION};
use placemark::services::preferences::Preferences;
use placemark::stores::local_store::LocalStore;
use placemark::stores::BookmarkStoreTrait;
use placemark::types::bookmark::{
    Bookmark, BookmarkDraft, BookmarkPatch, BookmarkQuery, Category, SortKey,
};
use placemark::types::errors::BookmarkError;

/// Store double whose every operation fails, to exercise fault handling.
struct FailingStore;

impl BookmarkStoreTrait for FailingStore {
    fn list(&self, _query: &BookmarkQuery) -> Result<Vec<Bookmark>, BookmarkError> {
        Err(BookmarkError::Storage("backing store unreachable".to_string()))
    }
    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        Err(BookmarkError::Storage(id.to_string()))
    }
    fn create(&mut self, _draft: BookmarkDraft) -> Result<Bookmark, BookmarkError> {
        Err(BookmarkError::Storage("create failed".to_string()))
    }
    fn update(&mut self, _id: &str, _patch: BookmarkPatch) -> Result<Bookmark, BookmarkError> {
        Err(BookmarkError::Storage("update failed".to_string()))
    }
    fn delete(&mut self, _id: &str) -> Result<(), BookmarkError> {
        Err(BookmarkError::Storage("delete failed".to_string()))
    }
}

fn setup() -> (TempDir, App) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = LocalStore::open(dir.path().join("bookmarks.json")).unwrap();
    let preferences = Preferences::new(Some(dir.path().join("preferences.json")));
    let mut app = App::new(Box::new(store), preferences);
    app.startup();
    (dir, app)
}

/// Drives the form flow to create a bookmark with the given title.
fn create_via_form(app: &mut App, title: &str) {
    app.open_create_form();
    app.edit_draft(BookmarkDraft {
        title: title.to_string(),
        ..BookmarkDraft::default()
    });
    app.submit_form();
}

#[test]
fn test_startup_reaches_ready_on_empty_store() {
    let (_dir, app) = setup();
    assert_eq!(*app.load_state(), LoadState::Ready);
    assert!(app.bookmarks().is_empty());
}

#[test]
fn test_empty_title_blocks_submission_without_store_call() {
    let (dir, mut app) = setup();

    app.open_create_form();
    app.edit_draft(BookmarkDraft::default());
    app.submit_form();

    // The form stays open with an inline error
    match app.dialog() {
        Some(Dialog::Form(form)) => assert!(form.title_error.is_some()),
        other => panic!("expected open form, got {:?}", other.is_some()),
    }

    // No store call was issued: the list and the mirror are untouched
    assert!(app.bookmarks().is_empty());
    assert!(!dir.path().join("bookmarks.json").exists());
    assert!(app.toast().is_none());
}

#[test]
fn test_create_flow_prepends_and_toasts() {
    let (_dir, mut app) = setup();

    create_via_form(&mut app, "Cafe Luna");
    create_via_form(&mut app, "Beach Bar");

    // Newest creation is prepended
    let titles: Vec<&str> = app.bookmarks().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Beach Bar", "Cafe Luna"]);

    let toast = app.toast().expect("success toast expected");
    assert_eq!(toast.message, "Bookmark added!");
    assert_eq!(toast.kind, ToastKind::Success);

    // The dialog closed on success
    assert!(app.dialog().is_none());
}

#[test]
fn test_edit_flow_prepopulates_and_replaces_by_id() {
    let (_dir, mut app) = setup();
    create_via_form(&mut app, "Harbor Walk");
    let original = app.bookmarks()[0].clone();

    app.open_edit_form(&original.id).unwrap();
    match app.dialog() {
        Some(Dialog::Form(form)) => {
            assert_eq!(form.editing_id.as_deref(), Some(original.id.as_str()));
            assert_eq!(form.draft.title, "Harbor Walk");
        }
        _ => panic!("expected open form"),
    }

    app.edit_draft(BookmarkDraft {
        title: "Harbor Walk".to_string(),
        description: "sunrise stroll".to_string(),
        category: Category::Travel,
        url: None,
    });
    app.submit_form();

    assert_eq!(app.bookmarks().len(), 1);
    let updated = &app.bookmarks()[0];
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.description, "sunrise stroll");
    assert_eq!(app.toast().unwrap().message, "Bookmark updated!");
}

#[test]
fn test_open_edit_form_unknown_id_is_not_found() {
    let (_dir, mut app) = setup();
    assert!(matches!(
        app.open_edit_form("missing"),
        Err(BookmarkError::NotFound(_))
    ));
    assert!(app.dialog().is_none());
}

#[test]
fn test_delete_requires_confirmation() {
    let (_dir, mut app) = setup();
    create_via_form(&mut app, "Ephemeral");
    let id = app.bookmarks()[0].id.clone();
    app.dismiss_toast();

    // Requesting deletion opens the confirmation naming the record
    app.request_delete(&id).unwrap();
    match app.dialog() {
        Some(Dialog::ConfirmDelete(record)) => assert_eq!(record.title, "Ephemeral"),
        _ => panic!("expected confirmation dialog"),
    }

    // No state change until confirm is invoked
    assert_eq!(app.bookmarks().len(), 1);

    // Cancelling leaves the record alone
    app.cancel_dialog();
    assert_eq!(app.bookmarks().len(), 1);
    assert!(app.toast().is_none());

    // Confirming actually deletes
    app.request_delete(&id).unwrap();
    app.confirm_delete();
    assert!(app.bookmarks().is_empty());
    assert_eq!(app.toast().unwrap().message, "Bookmark deleted!");
}

#[test]
fn test_confirm_delete_without_dialog_is_a_noop() {
    let (_dir, mut app) = setup();
    create_via_form(&mut app, "Stays");
    app.dismiss_toast();

    app.confirm_delete();
    assert_eq!(app.bookmarks().len(), 1);
    assert!(app.toast().is_none());
}

#[test]
fn test_toast_replaces_and_expires() {
    let (_dir, mut app) = setup();
    create_via_form(&mut app, "One");
    assert_eq!(app.toast().unwrap().message, "Bookmark added!");

    // A new notification replaces the current one
    let id = app.bookmarks()[0].id.clone();
    app.request_delete(&id).unwrap();
    app.confirm_delete();
    assert_eq!(app.toast().unwrap().message, "Bookmark deleted!");

    // Not expired right away
    app.expire_toast(Instant::now());
    assert!(app.toast().is_some());

    // Gone after the fixed duration
    app.expire_toast(Instant::now() + TOAST_DURATION + Duration::from_millis(100));
    assert!(app.toast().is_none());
}

#[test]
fn test_search_and_sort_rerun_the_listing() {
    let (_dir, mut app) = setup();
    create_via_form(&mut app, "Cafe Luna");
    create_via_form(&mut app, "Beach Bar");

    app.set_search("cafe");
    assert_eq!(app.bookmarks().len(), 1);
    assert_eq!(app.bookmarks()[0].title, "Cafe Luna");

    app.set_search("");
    app.set_sort(SortKey::Title);
    let titles: Vec<&str> = app.bookmarks().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Beach Bar", "Cafe Luna"]);
}

#[test]
fn test_failed_load_offers_retryable_state() {
    let dir = tempfile::tempdir().unwrap();
    let preferences = Preferences::new(Some(dir.path().join("preferences.json")));
    let mut app = App::new(Box::new(FailingStore), preferences);

    app.startup();
    assert!(matches!(app.load_state(), LoadState::Failed(_)));

    // Retry is just another refresh
    app.refresh();
    assert!(matches!(app.load_state(), LoadState::Failed(_)));
}

#[test]
fn test_store_fault_on_save_leaves_list_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let preferences = Preferences::new(Some(dir.path().join("preferences.json")));
    let mut app = App::new(Box::new(FailingStore), preferences);

    app.open_create_form();
    app.edit_draft(BookmarkDraft {
        title: "Doomed".to_string(),
        ..BookmarkDraft::default()
    });
    app.submit_form();

    assert!(app.bookmarks().is_empty());
    let toast = app.toast().expect("failure toast expected");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Could not save bookmark");
}

#[test]
fn test_theme_toggle_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("preferences.json");

    let store = LocalStore::open(dir.path().join("bookmarks.json")).unwrap();
    let mut app = App::new(
        Box::new(store),
        Preferences::new(Some(prefs_path.clone())),
    );
    let initial = app.is_dark_mode();

    app.toggle_theme();
    assert_eq!(app.is_dark_mode(), !initial);

    // A fresh controller picks up the saved preference
    let store = LocalStore::open(dir.path().join("bookmarks.json")).unwrap();
    let reopened = App::new(Box::new(store), Preferences::new(Some(prefs_path)));
    assert_eq!(reopened.is_dark_mode(), !initial);
}
