use stickies_core::ClientConfig;

use crate::commands::common::{normalize_note_identifier, open_store};
use crate::error::CliError;

pub async fn run_toggle(config: &ClientConfig, id: &str) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    let store = open_store(config)?;

    let note = store.toggle_complete(&id).await?;
    let state = if note.is_completed() { "done" } else { "open" };
    println!("{}\t{state}", note.id);
    Ok(())
}
