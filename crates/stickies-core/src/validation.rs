//! Draft validation and label parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Draft, Field, FieldErrors};

static LABEL_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("Invalid regex"));

/// Check the draft fields required for submission.
///
/// Returns one entry per blank field; an empty map means the draft is valid.
#[must_use]
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.title.trim().is_empty() {
        errors.insert(Field::Title, "Title is required");
    }
    if draft.description.trim().is_empty() {
        errors.insert(Field::Description, "Description is required");
    }
    if parse_labels(&draft.labels).is_empty() {
        errors.insert(Field::Labels, "Labels are required");
    }
    errors
}

/// Split raw label text on runs of commas and/or whitespace.
///
/// Order is preserved and empty tokens are dropped. Duplicates are kept.
///
/// # Examples
///
/// ```
/// use stickies_core::validation::parse_labels;
///
/// assert_eq!(parse_labels("a, b  c,,d"), vec!["a", "b", "c", "d"]);
/// ```
#[must_use]
pub fn parse_labels(raw: &str) -> Vec<String> {
    LABEL_SEPARATORS
        .split(raw)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(ToString::to_string)
        .collect()
}
