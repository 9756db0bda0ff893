//! Remote list client for the notes API.
//!
//! `NotesApi` is the seam the list store talks through; `HttpNotesClient` is
//! the reqwest-backed implementation. Every call is a future, so dropping it
//! cancels the request.

use std::future::Future;

use crate::error::Result;
use crate::models::{NewNote, Note, NoteId, NoteUpdate};
use crate::util::normalize_text_option;

mod http;
mod wire;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpNotesClient;

/// Filter and page selection for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Exact label to match; `None` lists every note
    pub label: Option<String>,
    /// 1-based page number
    pub page: u32,
}

impl ListQuery {
    /// Build a query from the store's filter text. A blank filter means no filter.
    #[must_use]
    pub fn new(filter_label: &str, page: u32) -> Self {
        Self {
            label: normalize_text_option(Some(filter_label.to_string())),
            page: page.max(1),
        }
    }

    /// Query-string pairs; `label` is left out entirely when unfiltered.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(label) = &self.label {
            params.push(("label", label.clone()));
        }
        params.push(("page", self.page.to_string()));
        params
    }
}

/// One page of notes as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePage {
    pub items: Vec<Note>,
    pub page: u32,
    pub total_pages: u32,
}

impl NotePage {
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Operations offered by the remote notes API.
pub trait NotesApi: Send + Sync + 'static {
    /// List one page of notes, optionally filtered by label.
    fn list_notes(&self, query: &ListQuery) -> impl Future<Output = Result<NotePage>> + Send;

    /// Fetch a single note; fails with `NotFound` when it does not exist.
    fn get_note(&self, id: &NoteId) -> impl Future<Output = Result<Note>> + Send;

    /// Create a note; the server assigns `id` and `created_at`.
    fn create_note(&self, note: &NewNote) -> impl Future<Output = Result<Note>> + Send;

    /// Apply a partial update; fails with `NotFound` when the note is gone.
    fn update_note(
        &self,
        id: &NoteId,
        update: &NoteUpdate,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// Delete a note; fails with `NotFound` when it is already gone.
    fn delete_note(&self, id: &NoteId) -> impl Future<Output = Result<()>> + Send;

    /// Distinct labels across every note, computed by the server.
    fn list_labels(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}
