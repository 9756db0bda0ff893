//! List state store.
//!
//! `NotesStore` owns everything the presentation layer shows: the current
//! page of notes, the label vocabulary, filter and paging, and the add/edit
//! form. It is the only caller of the remote API. State is published through
//! a `watch` channel; views subscribe and re-render on every committed change.
//!
//! The server is authoritative: every mutation goes over the wire first and
//! the list is refetched afterwards, nothing is patched optimistically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::api::{ListQuery, NotesApi};
use crate::config::{ClientConfig, MIN_FILTER_DEBOUNCE_MS};
use crate::debounce::Debouncer;
use crate::error::{Error, Result};
use crate::models::{Color, Draft, NewNote, Note, NoteId, NoteUpdate};
use crate::validation::{parse_labels, validate};


/// Tunables for a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Quiet interval before a filter change refetches
    pub filter_debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            filter_debounce: Duration::from_millis(MIN_FILTER_DEBOUNCE_MS),
        }
    }
}

impl From<&ClientConfig> for StoreOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            filter_debounce: config.filter_debounce(),
        }
    }
}

/// Form visibility and target.
///
/// `Editing` never moves straight to another `Editing`; the form has to be
/// closed first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Creating,
    Editing(NoteId),
}

impl Modal {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn edit_id(&self) -> Option<&NoteId> {
        match self {
            Self::Editing(id) => Some(id),
            Self::Closed | Self::Creating => None,
        }
    }
}

/// Coarse class of a failed remote call, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure; retrying may help
    Network,
    /// Non-2xx response; retrying may help
    Server,
    /// The target note no longer exists; refresh instead of retrying
    NotFound,
    Other,
}

/// Last remote failure surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    /// What the store was doing, e.g. `delete note`
    pub action: &'static str,
    pub message: String,
}

impl Failure {
    fn from_error(action: &'static str, error: &Error) -> Self {
        let kind = match error {
            Error::Network(_) => FailureKind::Network,
            Error::Server { .. } => FailureKind::Server,
            Error::NotFound(_) => FailureKind::NotFound,
            _ => FailureKind::Other,
        };
        Self {
            kind,
            action,
            message: error.to_string(),
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind, FailureKind::Network | FailureKind::Server)
    }
}

/// Everything a view needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current page of notes, in server order
    pub notes: Vec<Note>,
    /// Label vocabulary across all notes, not just this page
    pub unique_labels: Vec<String>,
    /// Empty means unfiltered
    pub filter_label: String,
    /// 1-based
    pub current_page: u32,
    pub total_pages: u32,
    pub modal: Modal,
    pub draft: Draft,
    pub last_error: Option<Failure>,
    /// A list fetch is outstanding
    pub loading: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            unique_labels: Vec::new(),
            filter_label: String::new(),
            current_page: 1,
            total_pages: 1,
            modal: Modal::Closed,
            draft: Draft::default(),
            last_error: None,
            loading: false,
        }
    }
}

impl Snapshot {
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Target of the edit form, `None` when creating or closed.
    #[must_use]
    pub const fn edit_id(&self) -> Option<&NoteId> {
        self.modal.edit_id()
    }

    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }
}

struct Inner<A> {
    api: A,
    state: watch::Sender<Snapshot>,
    notes_seq: AtomicU64,
    labels_seq: AtomicU64,
}

impl<A: NotesApi> Inner<A> {
    /// Mark every outstanding list response as stale and return a fresh ticket.
    fn next_notes_ticket(&self) -> u64 {
        self.notes_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn refresh_notes(&self) -> Result<()> {
        let page = self.state.borrow().current_page;
        self.refresh_notes_at(page).await
    }

    /// Fetch `page` under the current filter. `current_page` only moves when
    /// the fetch succeeds.
    async fn refresh_notes_at(&self, page: u32) -> Result<()> {
        let ticket = self.next_notes_ticket();
        let query = ListQuery::new(&self.state.borrow().filter_label, page);
        self.state.send_modify(|state| state.loading = true);

        let result = self.api.list_notes(&query).await;
        let mut outcome = Ok(());
        let applied = self.state.send_if_modified(|state| {
            if self.notes_seq.load(Ordering::SeqCst) != ticket {
                return false;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    state.notes = page.items;
                    state.current_page = page.page;
                    state.total_pages = page.total_pages.max(1);
                }
                Err(error) => {
                    state.last_error = Some(Failure::from_error("load notes", &error));
                    outcome = Err(error);
                }
            }
            true
        });

        if !applied {
            tracing::debug!(ticket, "Discarding superseded note list response");
        } else if let Err(error) = &outcome {
            tracing::error!("Error fetching notes: {}", error);
        }
        outcome
    }

    async fn refresh_labels(&self) -> Result<()> {
        let ticket = self.labels_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.list_labels().await;

        let mut outcome = Ok(());
        let applied = self.state.send_if_modified(|state| {
            if self.labels_seq.load(Ordering::SeqCst) != ticket {
                return false;
            }
            match result {
                Ok(labels) => state.unique_labels = labels,
                Err(error) => {
                    state.last_error = Some(Failure::from_error("load labels", &error));
                    outcome = Err(error);
                }
            }
            true
        });

        if !applied {
            tracing::debug!(ticket, "Discarding superseded label response");
        } else if let Err(error) = &outcome {
            tracing::error!("Error fetching unique labels: {}", error);
        }
        outcome
    }

    async fn refresh_all(&self) -> Result<()> {
        let (notes, labels) = tokio::join!(self.refresh_notes(), self.refresh_labels());
        notes.and(labels)
    }

    fn record_failure(&self, action: &'static str, error: &Error) {
        tracing::error!("Error trying to {}: {}", action, error);
        self.state
            .send_modify(|state| state.last_error = Some(Failure::from_error(action, error)));
    }
}

/// Handle to the list state. Clones share the same state.
pub struct NotesStore<A: NotesApi> {
    inner: Arc<Inner<A>>,
    filter_refetch: Arc<Debouncer<()>>,
}

impl<A: NotesApi> Clone for NotesStore<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            filter_refetch: Arc::clone(&self.filter_refetch),
        }
    }
}

impl<A: NotesApi> NotesStore<A> {
    pub fn new(api: A, options: StoreOptions) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        let inner = Arc::new(Inner {
            api,
            state,
            notes_seq: AtomicU64::new(0),
            labels_seq: AtomicU64::new(0),
        });

        let debounced = Arc::clone(&inner);
        let filter_refetch = Debouncer::new(options.filter_debounce, move |()| {
            let inner = Arc::clone(&debounced);
            async move {
                // Failures are recorded in the snapshot by refresh_notes.
                let _ = inner.refresh_notes().await;
            }
        });

        Self {
            inner,
            filter_refetch: Arc::new(filter_refetch),
        }
    }

    /// Latest committed state.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every committed state change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.state.subscribe()
    }

    /// Initial fetch of the current page and the label vocabulary.
    pub async fn load(&self) -> Result<()> {
        self.refresh().await
    }

    /// Refetch the current page and the label vocabulary now.
    pub async fn refresh(&self) -> Result<()> {
        self.clear_failure();
        self.filter_refetch.cancel();
        self.inner.refresh_all().await
    }

    /// Refetch only the label vocabulary.
    pub async fn load_labels(&self) -> Result<()> {
        self.clear_failure();
        self.inner.refresh_labels().await
    }

    /// Change the label filter and jump back to page 1.
    ///
    /// The refetch is debounced so rapid changes issue a single request.
    /// Responses to requests made under the previous filter are ignored.
    pub fn set_filter(&self, label: &str) {
        let label = label.trim().to_string();
        tracing::debug!(label = %label, "Filter changed");
        self.inner.state.send_modify(|state| {
            state.filter_label = label;
            state.current_page = 1;
            state.last_error = None;
        });
        self.inner.next_notes_ticket();
        self.filter_refetch.call(());
    }

    /// Set the filter and fetch `page` under it right away, skipping the
    /// debounce and the label vocabulary.
    pub async fn show_page(&self, label: &str, page: u32) -> Result<()> {
        self.clear_failure();
        self.filter_refetch.cancel();
        let label = label.trim().to_string();
        self.inner
            .state
            .send_if_modified(|state| {
                if state.filter_label == label {
                    return false;
                }
                state.filter_label = label;
                true
            });
        self.inner.refresh_notes_at(page.max(1)).await
    }

    /// Whether a debounced filter refetch is still waiting to fire.
    pub fn filter_refetch_pending(&self) -> bool {
        self.filter_refetch.is_pending()
    }

    /// Go to a page, clamped to `[1, total_pages]`, and fetch it immediately.
    pub async fn set_page(&self, page: u32) -> Result<()> {
        self.clear_failure();
        self.filter_refetch.cancel();
        let page = page.clamp(1, self.inner.state.borrow().total_pages.max(1));
        self.inner.refresh_notes_at(page).await
    }

    pub async fn next_page(&self) -> Result<()> {
        let page = self.inner.state.borrow().current_page.saturating_add(1);
        self.set_page(page).await
    }

    pub async fn previous_page(&self) -> Result<()> {
        let page = self.inner.state.borrow().current_page.saturating_sub(1);
        self.set_page(page).await
    }

    /// Open an empty add form.
    pub fn open_create(&self) -> Result<()> {
        let opened = self.inner.state.send_if_modified(|state| {
            if state.modal.is_open() {
                return false;
            }
            state.modal = Modal::Creating;
            state.draft = Draft::default();
            true
        });
        if opened {
            Ok(())
        } else {
            Err(Error::InvalidState("a form is already open"))
        }
    }

    /// Open the edit form for a note, populated from a fresh server copy.
    pub async fn open_edit(&self, id: &NoteId) -> Result<()> {
        if self.inner.state.borrow().modal.is_open() {
            return Err(Error::InvalidState("a form is already open"));
        }
        self.clear_failure();

        let note = match self.inner.api.get_note(id).await {
            Ok(note) => note,
            Err(error) => {
                self.inner.record_failure("open note", &error);
                return Err(error);
            }
        };

        let opened = self.inner.state.send_if_modified(|state| {
            if state.modal.is_open() {
                return false;
            }
            state.modal = Modal::Editing(id.clone());
            state.draft = Draft::from_note(&note);
            true
        });
        if opened {
            Ok(())
        } else {
            Err(Error::InvalidState("another form was opened while loading"))
        }
    }

    /// Edit draft fields while a form is open.
    pub fn update_draft(&self, edit: impl FnOnce(&mut Draft)) -> Result<()> {
        if !self.inner.state.borrow().modal.is_open() {
            return Err(Error::InvalidState("no form is open"));
        }
        self.inner.state.send_modify(|state| edit(&mut state.draft));
        Ok(())
    }

    /// Close the form and discard the draft. Returns whether a form was open.
    pub fn cancel(&self) -> bool {
        self.inner.state.send_if_modified(|state| {
            if !state.modal.is_open() {
                return false;
            }
            state.modal = Modal::Closed;
            state.draft = Draft::default();
            true
        })
    }

    /// Validate and save the open form.
    ///
    /// Validation errors are stored on the draft and nothing is sent. A
    /// remote failure leaves the form open with the draft untouched.
    pub async fn submit(&self) -> Result<Note> {
        let (modal, draft) = {
            let state = self.inner.state.borrow();
            (state.modal.clone(), state.draft.clone())
        };
        if modal == Modal::Closed {
            return Err(Error::InvalidState("no form is open"));
        }

        let errors = validate(&draft);
        if !errors.is_empty() {
            tracing::debug!("Draft failed validation: {}", errors);
            let stored = errors.clone();
            self.inner
                .state
                .send_modify(|state| state.draft.errors = stored);
            return Err(Error::Validation(errors));
        }

        self.clear_failure();
        self.inner
            .state
            .send_if_modified(|state| {
                let had_errors = !state.draft.errors.is_empty();
                state.draft.errors = errors;
                had_errors
            });

        let labels = parse_labels(&draft.labels);
        let (action, result) = match &modal {
            Modal::Editing(id) => {
                let update = NoteUpdate {
                    title: Some(draft.title.trim().to_string()),
                    description: Some(draft.description.trim().to_string()),
                    labels: Some(labels),
                    color: draft.color,
                    completed_at: None,
                };
                ("update note", self.inner.api.update_note(id, &update).await)
            }
            Modal::Creating => {
                let note = NewNote::new(
                    draft.title.trim(),
                    draft.description.trim(),
                    labels,
                    draft.color.unwrap_or_else(Color::random),
                );
                ("add note", self.inner.api.create_note(&note).await)
            }
            Modal::Closed => return Err(Error::InvalidState("no form is open")),
        };

        let note = match result {
            Ok(note) => note,
            Err(error) => {
                self.inner.record_failure(action, &error);
                return Err(error);
            }
        };
        tracing::info!("Saved note {}", note.id);

        self.inner.state.send_if_modified(|state| {
            if state.modal != modal {
                return false;
            }
            state.modal = Modal::Closed;
            state.draft = Draft::default();
            true
        });
        self.refresh_after_mutation(action).await;
        Ok(note)
    }

    /// Delete a note, stepping back a page if this one is left empty.
    pub async fn remove(&self, id: &NoteId) -> Result<()> {
        self.clear_failure();
        if let Err(error) = self.inner.api.delete_note(id).await {
            self.inner.record_failure("delete note", &error);
            return Err(error);
        }
        tracing::info!("Deleted note {}", id);

        self.inner.state.send_modify(|state| {
            state.notes.retain(|note| &note.id != id);
            if state.notes.is_empty() && state.current_page > 1 {
                state.current_page -= 1;
            }
        });
        self.refresh_after_mutation("delete note").await;
        Ok(())
    }

    /// Flip a note between open and complete.
    ///
    /// The current completion state is read from the server, not the cached
    /// page, so the flip is relative to what is actually stored.
    pub async fn toggle_complete(&self, id: &NoteId) -> Result<Note> {
        self.clear_failure();
        let result = async {
            let current = self.inner.api.get_note(id).await?;
            let completed_at = if current.is_completed() {
                None
            } else {
                Some(Utc::now())
            };
            self.inner
                .api
                .update_note(id, &NoteUpdate::completion(completed_at))
                .await
        }
        .await;

        let note = match result {
            Ok(note) => note,
            Err(error) => {
                self.inner.record_failure("toggle note", &error);
                return Err(error);
            }
        };
        tracing::info!(completed = note.is_completed(), "Toggled note {}", note.id);

        self.refresh_after_mutation("toggle note").await;
        Ok(note)
    }

    /// Refetch list and labels after a successful write. Failures are already
    /// recorded in the snapshot; the write itself stands.
    async fn refresh_after_mutation(&self, action: &'static str) {
        if let Err(error) = self.inner.refresh_all().await {
            tracing::warn!("Refresh after {} failed: {}", action, error);
        }
    }

    fn clear_failure(&self) {
        self.inner
            .state
            .send_if_modified(|state| state.last_error.take().is_some());
    }
}
