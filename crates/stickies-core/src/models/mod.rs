//! Data models for Stickies

mod draft;
mod note;
pub mod timestamp;

pub use draft::{Draft, Field, FieldErrors};
pub use note::{Color, NewNote, Note, NoteId, NoteUpdate};
