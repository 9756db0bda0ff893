use std::env;
use std::io::{self, IsTerminal};

use chrono::{Local, Utc};
use stickies_core::{ClientConfig, Color, HttpNotesClient, NoteId, NotesStore, StoreOptions};

use crate::config::{resolve_client_config, CliConfigFile, API_URL_ENV};
use crate::error::CliError;
use crate::render::View;

pub type Store = NotesStore<HttpNotesClient>;

/// Resolve client configuration from the flag, environment, and config file.
pub fn load_client_config(api_url: Option<String>) -> Result<ClientConfig, CliError> {
    let file = CliConfigFile::load()?;
    resolve_client_config(api_url, env::var(API_URL_ENV).ok(), &file)
}

pub fn open_store(config: &ClientConfig) -> Result<Store, CliError> {
    let client = HttpNotesClient::new(config)?;
    tracing::debug!("Using notes API at {}", client.base_url());
    Ok(NotesStore::new(client, StoreOptions::from(config)))
}

pub fn normalize_note_identifier(id: &str) -> Result<NoteId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(NoteId::from(trimmed))
    }
}

pub fn parse_color(raw: Option<&str>) -> Result<Option<Color>, CliError> {
    raw.map(str::parse::<Color>).transpose().map_err(CliError::from)
}

/// Local-time view of stdout, styled only when it is a terminal.
pub fn stdout_view() -> View<'static, Local> {
    View {
        tz: &Local,
        now: Utc::now(),
        styled: io::stdout().is_terminal(),
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
