//! stickies-core - Core library for Stickies
//!
//! This crate contains the note models, the HTTP client for the remote notes
//! API, and the list state store shared by every Stickies interface.

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod models;
pub mod store;
pub mod util;
pub mod validation;

pub use api::{HttpNotesClient, ListQuery, NotePage, NotesApi};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{Color, Draft, Field, FieldErrors, NewNote, Note, NoteId, NoteUpdate};
pub use store::{Failure, FailureKind, Modal, NotesStore, Snapshot, StoreOptions};
