//! Form draft for creating or editing a note

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{Color, Note};

/// Editable draft fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Description,
    Labels,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Labels => "labels",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to human-readable message. Absent fields are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

/// Unsaved form state.
///
/// `labels` is the raw delimited text the user typed; it is parsed only on
/// submit. A `None` color on create means a palette color is picked for the
/// user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub labels: String,
    pub color: Option<Color>,
    pub errors: FieldErrors,
}

impl Draft {
    /// Populate a draft from a server copy of a note.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            description: note.description.clone(),
            labels: note.labels.join(" "),
            color: Some(note.color),
            errors: FieldErrors::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn field_errors_display_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Labels, "Labels are required");
        errors.insert(Field::Title, "Title is required");
        assert_eq!(
            errors.to_string(),
            "title: Title is required; labels: Labels are required"
        );
    }

    #[test]
    fn draft_from_note_joins_labels_with_spaces() {
        let note = Note {
            id: "1".into(),
            title: "Plan".to_string(),
            description: "Quarterly".to_string(),
            labels: vec!["work".to_string(), "q3".to_string()],
            color: Color::Green,
            created_at: Utc::now(),
            completed_at: None,
        };

        let draft = Draft::from_note(&note);
        assert_eq!(draft.labels, "work q3");
        assert_eq!(draft.color, Some(Color::Green));
        assert!(draft.errors.is_empty());
    }
}
