//! Interactive session: renders every store change and maps typed commands
//! onto store intents.

use std::io::{self, IsTerminal, Write};

use chrono::{Local, Utc};
use stickies_core::{ClientConfig, Color, NoteId};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{normalize_note_identifier, open_store, Store};
use crate::error::CliError;
use crate::render::View;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub const SHELL_HELP: &str = "\
Commands:
  filter <label>     show only notes with this label
  all                clear the label filter
  page <n>           jump to a page
  next | prev        move one page
  new                open the add form
  edit <id>          open the edit form for a note
  title <text>       set the form title
  desc <text>        set the form description
  labels <a b c>     set the form labels
  color <name>       set the form color (`random` to clear)
  save | cancel      submit or discard the form
  rm <id>            delete a note
  toggle <id>        mark a note complete or open
  refresh            refetch notes and labels
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Filter(String),
    All,
    Page(u32),
    Next,
    Prev,
    New,
    Edit(NoteId),
    Title(String),
    Desc(String),
    Labels(String),
    Color(Option<Color>),
    Save,
    Cancel,
    Remove(NoteId),
    Toggle(NoteId),
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_shell_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_lowercase().as_str() {
        "filter" | "f" if rest.is_empty() => ShellCommand::All,
        "filter" | "f" => ShellCommand::Filter(rest.trim_start_matches('#').to_string()),
        "all" => ShellCommand::All,
        "page" | "p" => ShellCommand::Page(
            rest.parse()
                .map_err(|_| format!("Invalid page number: {rest:?}"))?,
        ),
        "next" | "n" => ShellCommand::Next,
        "prev" | "previous" => ShellCommand::Prev,
        "new" | "add" => ShellCommand::New,
        "edit" | "e" => ShellCommand::Edit(note_id(rest)?),
        "title" => ShellCommand::Title(rest.to_string()),
        "desc" | "description" => ShellCommand::Desc(rest.to_string()),
        "labels" => ShellCommand::Labels(rest.to_string()),
        "color" if rest.eq_ignore_ascii_case("random") => ShellCommand::Color(None),
        "color" => ShellCommand::Color(Some(
            rest.parse::<Color>().map_err(|error| error.to_string())?,
        )),
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "rm" | "delete" => ShellCommand::Remove(note_id(rest)?),
        "toggle" | "t" => ShellCommand::Toggle(note_id(rest)?),
        "refresh" | "r" => ShellCommand::Refresh,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {other}. Type `help` for a list")),
    };
    Ok(Some(command))
}

fn note_id(raw: &str) -> Result<NoteId, String> {
    normalize_note_identifier(raw).map_err(|error| error.to_string())
}

/// Apply a command to the store. `Help` and `Quit` are handled by the caller.
pub async fn apply(store: &Store, command: ShellCommand) -> stickies_core::Result<()> {
    match command {
        ShellCommand::Filter(label) => store.set_filter(&label),
        ShellCommand::All => store.set_filter(""),
        ShellCommand::Page(page) => store.set_page(page).await?,
        ShellCommand::Next => store.next_page().await?,
        ShellCommand::Prev => store.previous_page().await?,
        ShellCommand::New => store.open_create()?,
        ShellCommand::Edit(id) => store.open_edit(&id).await?,
        ShellCommand::Title(title) => store.update_draft(|draft| draft.title = title)?,
        ShellCommand::Desc(text) => store.update_draft(|draft| draft.description = text)?,
        ShellCommand::Labels(labels) => store.update_draft(|draft| draft.labels = labels)?,
        ShellCommand::Color(color) => store.update_draft(|draft| draft.color = color)?,
        ShellCommand::Save => {
            store.submit().await?;
        }
        ShellCommand::Cancel => {
            store.cancel();
        }
        ShellCommand::Remove(id) => store.remove(&id).await?,
        ShellCommand::Toggle(id) => {
            store.toggle_complete(&id).await?;
        }
        ShellCommand::Refresh => store.refresh().await?,
        ShellCommand::Help | ShellCommand::Quit => {}
    }
    Ok(())
}

/// Errors the snapshot already shows, either as a failure banner or as
/// field errors on the form.
const fn is_rendered(error: &stickies_core::Error) -> bool {
    matches!(
        error,
        stickies_core::Error::Validation(_)
            | stickies_core::Error::Network(_)
            | stickies_core::Error::Server { .. }
            | stickies_core::Error::NotFound(_)
    )
}

pub async fn run_shell(config: &ClientConfig) -> Result<(), CliError> {
    let store = open_store(config)?;
    let styled = io::stdout().is_terminal();

    let mut updates = store.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let view = View {
                tz: &Local,
                now: Utc::now(),
                styled,
            };
            let mut stdout = io::stdout().lock();
            if styled {
                let _ = write!(stdout, "{CLEAR_SCREEN}");
            }
            for line in view.snapshot(&snapshot) {
                let _ = writeln!(stdout, "{line}");
            }
            let _ = write!(stdout, "> ");
            let _ = stdout.flush();
        }
    });

    if let Err(error) = store.load().await {
        tracing::debug!("Initial load failed: {}", error);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_shell_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{SHELL_HELP}"),
            command => {
                if let Err(error) = apply(&store, command).await {
                    if !is_rendered(&error) {
                        eprintln!("Error: {error}");
                    }
                }
            }
        }
    }

    renderer.abort();
    Ok(())
}
