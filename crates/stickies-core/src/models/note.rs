//! Note model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp;
use crate::error::Error;

/// Server-assigned note identifier.
///
/// The notes API may hand out numeric or string ids; both are held as text
/// and only ever compared or echoed back into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Note ID cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// Card colors a note can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    #[default]
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
    Red,
}

impl Color {
    pub const PALETTE: [Self; 6] = [
        Self::Yellow,
        Self::Blue,
        Self::Green,
        Self::Pink,
        Self::Purple,
        Self::Red,
    ];

    /// Pick a palette color at random, used for new notes with no explicit color.
    #[must_use]
    pub fn random() -> Self {
        Self::PALETTE
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }

    /// Short human name (`yellow`, `blue`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Red => "red",
        }
    }

    /// Value the notes API stores for this color.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Yellow => "bg-yellow-100",
            Self::Blue => "bg-blue-100",
            Self::Green => "bg-green-100",
            Self::Pink => "bg-pink-100",
            Self::Purple => "bg-purple-100",
            Self::Red => "bg-red-100",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::PALETTE.into_iter().find(|color| {
            value.eq_ignore_ascii_case(color.name()) || value.eq_ignore_ascii_case(color.wire_value())
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let names = Self::PALETTE.map(Self::name).join(", ");
            Error::InvalidInput(format!("unknown color '{}' (expected one of: {names})", s.trim()))
        })
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_else(|| {
            tracing::debug!("Unknown note color {:?}, using default", value);
            Self::default()
        })
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.wire_value().to_string()
    }
}

/// A note as stored by the notes API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Server-assigned identifier
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// Labels in server order; duplicates are kept
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub color: Color,
    /// Creation timestamp, set once by the server
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Completion moment; `None` means the note is still open
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Whether the note has been marked complete
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub color: Color,
    pub completed: bool,
}

impl NewNote {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        labels: Vec<String>,
        color: Color,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            labels,
            color,
            completed: false,
        }
    }
}

/// Body of a partial update request. Unset fields are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// `Some(None)` sends an explicit `null`, reopening the note
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::double_option"
    )]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl NoteUpdate {
    /// Update that only sets or clears the completion moment.
    #[must_use]
    pub fn completion(completed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            completed_at: Some(completed_at),
            ..Self::default()
        }
    }
}
