use stickies_core::ClientConfig;

use crate::commands::common::{normalize_note_identifier, open_store};
use crate::error::CliError;

pub async fn run_delete(config: &ClientConfig, id: &str) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    let store = open_store(config)?;

    store.remove(&id).await?;
    println!("{id}");
    Ok(())
}
