//! App Core for Placemark.
//!
//! Central state container for the client: owns the bookmark list, the
//! active search/sort settings, the theme flag, and the transient UI
//! state (dialogs, toasts, load phase). The presentation layer renders
//! from this struct and mutates it only through the methods below.
//!
//! The store adapter is chosen at composition time: a `RemoteStore` for
//! the server-backed variant, a `LocalStore` for the local-only one. The
//! controller itself never branches on the variant.

use std::time::{Duration, Instant};

use crate::services::preferences::{Preferences, PreferencesTrait};
use crate::stores::BookmarkStoreTrait;
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, BookmarkQuery, SortKey};
use crate::types::errors::BookmarkError;
use crate::types::preferences::ThemeMode;

/// How long a toast stays on screen unless dismissed earlier.
pub const TOAST_DURATION: Duration = Duration::from_millis(3200);

/// Visual flavor of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// An ephemeral notification. A new toast replaces any current one.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    fn new(message: &str, kind: ToastKind) -> Self {
        Self {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        }
    }

    /// Whether the toast should be gone at the given instant.
    pub fn expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_DURATION
    }
}

/// Phase of the bookmark list load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Initial load failed; the UI offers a retry via [`App::refresh`].
    Failed(String),
}

/// State of the open create/edit form.
#[derive(Debug, Clone)]
pub struct FormState {
    /// `Some` when editing an existing record, `None` when creating.
    pub editing_id: Option<String>,
    pub draft: BookmarkDraft,
    /// Inline validation message for the title field.
    pub title_error: Option<String>,
}

/// Which modal dialog is open, if any.
#[derive(Debug, Clone)]
pub enum Dialog {
    Form(FormState),
    /// Deletion awaits explicit confirmation naming this record.
    ConfirmDelete(Bookmark),
}

/// Central client state container.
pub struct App {
    store: Box<dyn BookmarkStoreTrait>,
    preferences: Preferences,
    bookmarks: Vec<Bookmark>,
    search: String,
    sort: SortKey,
    load_state: LoadState,
    dialog: Option<Dialog>,
    toast: Option<Toast>,
    dark_mode: bool,
}

impl App {
    /// Creates the controller over the given store adapter. The theme
    /// flag is initialized from the saved preference, falling back to
    /// the system preference.
    pub fn new(store: Box<dyn BookmarkStoreTrait>, mut preferences: Preferences) -> Self {
        let _ = preferences.load();
        let dark_mode = preferences.resolve_theme() == ThemeMode::Dark;

        Self {
            store,
            preferences,
            bookmarks: Vec::new(),
            search: String::new(),
            sort: SortKey::Newest,
            load_state: LoadState::Loading,
            dialog: None,
            toast: None,
            dark_mode,
        }
    }

    /// Startup sequence: run the initial list load.
    pub fn startup(&mut self) {
        self.refresh();
    }

    /// Re-runs the list call with the current search/sort. For a remote
    /// store this is a network round trip; for a local store it is an
    /// in-memory recompute. Also serves as the user-initiated retry
    /// after a failed load.
    pub fn refresh(&mut self) {
        self.load_state = LoadState::Loading;
        match self.store.list(&self.current_query()) {
            Ok(bookmarks) => {
                self.bookmarks = bookmarks;
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    fn current_query(&self) -> BookmarkQuery {
        let search = self.search.trim();
        let search = (!search.is_empty()).then(|| search.to_string());
        BookmarkQuery::new(search, self.sort)
    }

    /// Updates the search text and re-runs the listing.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.refresh();
    }

    /// Updates the sort key and re-runs the listing.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh();
    }

    /// Opens the form with empty defaults for a new bookmark.
    pub fn open_create_form(&mut self) {
        self.dialog = Some(Dialog::Form(FormState {
            editing_id: None,
            draft: BookmarkDraft::default(),
            title_error: None,
        }));
    }

    /// Opens the form pre-populated with an existing record's fields.
    pub fn open_edit_form(&mut self, id: &str) -> Result<(), BookmarkError> {
        let record = self
            .bookmarks
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        self.dialog = Some(Dialog::Form(FormState {
            editing_id: Some(record.id.clone()),
            draft: BookmarkDraft {
                title: record.title.clone(),
                url: record.url.clone(),
                description: record.description.clone(),
                category: record.category,
            },
            title_error: None,
        }));
        Ok(())
    }

    /// Replaces the draft of the open form. No-op when no form is open.
    pub fn edit_draft(&mut self, draft: BookmarkDraft) {
        if let Some(Dialog::Form(form)) = &mut self.dialog {
            form.draft = draft;
            form.title_error = None;
        }
    }

    /// Submits the open form.
    ///
    /// Validation runs first: an empty title sets an inline form error
    /// and issues no store call. On success the result is prepended
    /// (create) or replaced by id (update) and a success toast is shown.
    /// On a store fault an error toast is shown and the list is left
    /// unchanged. The form closes in both outcome paths, but stays open
    /// on a validation error.
    pub fn submit_form(&mut self) {
        let Some(Dialog::Form(form)) = &mut self.dialog else {
            return;
        };

        if let Err(e) = form.draft.validate() {
            form.title_error = Some(e.to_string());
            return;
        }

        let form = form.clone();
        let outcome = match &form.editing_id {
            None => self.store.create(form.draft.clone()).map(|created| {
                self.bookmarks.insert(0, created);
                "Bookmark added!"
            }),
            Some(id) => {
                let patch = BookmarkPatch {
                    title: Some(form.draft.title.clone()),
                    url: form.draft.url.clone(),
                    description: Some(form.draft.description.clone()),
                    category: Some(form.draft.category),
                };
                self.store.update(id, patch).map(|updated| {
                    if let Some(slot) = self.bookmarks.iter_mut().find(|b| b.id == updated.id) {
                        *slot = updated;
                    }
                    "Bookmark updated!"
                })
            }
        };

        match outcome {
            Ok(msg) => self.show_toast(msg, ToastKind::Success),
            Err(_) => self.show_toast("Could not save bookmark", ToastKind::Error),
        }
        self.dialog = None;
    }

    /// Opens the delete confirmation naming the record's title. The
    /// record itself is untouched until [`App::confirm_delete`].
    pub fn request_delete(&mut self, id: &str) -> Result<(), BookmarkError> {
        let record = self
            .bookmarks
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        self.dialog = Some(Dialog::ConfirmDelete(record));
        Ok(())
    }

    /// Confirms the pending deletion. No-op when no confirmation is open.
    pub fn confirm_delete(&mut self) {
        let Some(Dialog::ConfirmDelete(record)) = self.dialog.take() else {
            return;
        };

        match self.store.delete(&record.id) {
            Ok(()) => {
                self.bookmarks.retain(|b| b.id != record.id);
                self.show_toast("Bookmark deleted!", ToastKind::Success);
            }
            Err(_) => {
                self.show_toast("Could not delete bookmark", ToastKind::Error);
            }
        }
    }

    /// Closes any open dialog without touching the list.
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Flips the dark/light flag and persists the choice.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        let theme = if self.dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };
        let _ = self.preferences.set_theme(theme);
    }

    /// Shows a toast, replacing any currently visible one.
    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast::new(message, kind));
    }

    /// Drops the toast once its duration has elapsed at `now`.
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.expired_at(now)) {
            self.toast = None;
        }
    }

    /// Dismisses the toast early.
    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    // Read accessors for the presentation layer.

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }
}
