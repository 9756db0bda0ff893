use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}. Run `stickies list` to see current notes")]
    NoteGone(stickies_core::Error),
    #[error(transparent)]
    Core(stickies_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Nothing to change; pass at least one of --title, --description, --labels, --color")]
    NothingToEdit,
    #[error(
        "No API URL configured. Pass --api-url, set STICKIES_API_URL, or run `stickies config init --api-url <URL>`"
    )]
    MissingApiUrl,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<stickies_core::Error> for CliError {
    fn from(error: stickies_core::Error) -> Self {
        match error {
            stickies_core::Error::NotFound(_) => Self::NoteGone(error),
            other => Self::Core(other),
        }
    }
}
