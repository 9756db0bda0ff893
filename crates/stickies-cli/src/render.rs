//! Text rendering of notes and store snapshots.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use stickies_core::format::{format_relative_time, format_timestamp};
use stickies_core::models::timestamp;
use stickies_core::{Field, Modal, Note, Snapshot};

const STRIKE: &str = "\x1b[9m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Rendering context: time zone for creation times, the reference instant for
/// relative ages, and whether ANSI styling is allowed.
pub struct View<'a, Tz: TimeZone> {
    pub tz: &'a Tz,
    pub now: DateTime<Utc>,
    pub styled: bool,
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub color: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub completed: bool,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        description: note.description.clone(),
        labels: note.labels.clone(),
        color: note.color.name().to_string(),
        created_at: timestamp::to_wire(&note.created_at),
        completed_at: note.completed_at.as_ref().map(timestamp::to_wire),
        completed: note.is_completed(),
    }
}

pub fn render_labels(labels: &[String]) -> String {
    labels
        .iter()
        .map(|label| format!("#{label}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl<Tz> View<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn strike(&self, text: &str) -> String {
        if self.styled {
            format!("{STRIKE}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.styled {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// One note as a small card: marker and title, description, then labels,
    /// creation time, and the id the other commands take.
    pub fn note_card(&self, note: &Note) -> Vec<String> {
        let marker = if note.is_completed() { "[x]" } else { "[ ]" };
        let (title, description) = if note.is_completed() {
            (self.strike(&note.title), self.strike(&note.description))
        } else {
            (note.title.clone(), note.description.clone())
        };

        let created = format_timestamp(&note.created_at.with_timezone(self.tz));
        let age = format_relative_time(&note.created_at, &self.now);
        let labels = render_labels(&note.labels);
        let meta = format!("id {} · {} · {created} ({age})", note.id, note.color);

        let mut lines = vec![format!("{marker} {title}")];
        lines.extend(description.lines().map(|line| format!("    {line}")));
        if !labels.is_empty() {
            lines.push(format!("    {labels}"));
        }
        lines.push(format!("    {}", self.dim(&meta)));
        lines
    }

    pub fn note_list(&self, notes: &[Note]) -> Vec<String> {
        if notes.is_empty() {
            return vec!["No notes found.".to_string()];
        }
        let mut lines = Vec::new();
        for (index, note) in notes.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.extend(self.note_card(note));
        }
        lines
    }

    /// Full shell screen for a snapshot.
    pub fn snapshot(&self, snapshot: &Snapshot) -> Vec<String> {
        let mut lines = vec![filter_bar(&snapshot.unique_labels, &snapshot.filter_label)];
        lines.push(String::new());
        if snapshot.loading && snapshot.notes.is_empty() {
            lines.push("Loading...".to_string());
        } else {
            lines.extend(self.note_list(&snapshot.notes));
        }
        lines.push(String::new());
        lines.push(page_footer(
            snapshot.current_page,
            snapshot.total_pages,
            snapshot.loading,
        ));

        if snapshot.modal.is_open() {
            lines.push(String::new());
            lines.extend(form_view(snapshot));
        }

        if let Some(failure) = &snapshot.last_error {
            let hint = if failure.is_retryable() {
                "try again"
            } else {
                "run `refresh`"
            };
            lines.push(String::new());
            lines.push(format!(
                "! Could not {}: {} ({hint})",
                failure.action, failure.message
            ));
        }
        lines
    }
}

/// Filter options: `All` followed by each label, the active one starred.
pub fn filter_bar(labels: &[String], active: &str) -> String {
    let mut options = vec![if active.is_empty() {
        "*All".to_string()
    } else {
        "All".to_string()
    }];
    options.extend(labels.iter().map(|label| {
        if label == active {
            format!("*#{label}")
        } else {
            format!("#{label}")
        }
    }));
    format!("Filter: {}", options.join("  "))
}

pub fn page_footer(current: u32, total: u32, loading: bool) -> String {
    let previous = if current > 1 { "< prev" } else { "      " };
    let next = if current < total { "next >" } else { "" };
    let mut footer = format!("{previous}  Page {current} of {total}  {next}");
    if loading {
        footer.push_str("  (loading)");
    }
    footer.trim_end().to_string()
}

pub fn form_view(snapshot: &Snapshot) -> Vec<String> {
    let heading = match &snapshot.modal {
        Modal::Editing(id) => format!("Edit note {id}"),
        Modal::Creating | Modal::Closed => "Add note".to_string(),
    };
    let draft = &snapshot.draft;
    let color = draft
        .color
        .map_or_else(|| "random".to_string(), |color| color.to_string());

    let mut lines = vec![format!("== {heading} ==")];
    for (field, value) in [
        (Field::Title, draft.title.as_str()),
        (Field::Description, draft.description.as_str()),
        (Field::Labels, draft.labels.as_str()),
    ] {
        lines.push(format!("  {:<12} {value}", format!("{}:", field.as_str())));
        if let Some(message) = draft.errors.get(field) {
            lines.push(format!("  {:<12} ^ {message}", ""));
        }
    }
    lines.push(format!("  {:<12} {color}", "color:"));
    lines.push("  `save` to submit, `cancel` to discard".to_string());
    lines
}
