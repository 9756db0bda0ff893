use stickies_core::ClientConfig;

use crate::commands::common::{open_store, parse_color};
use crate::error::CliError;

pub async fn run_add(
    config: &ClientConfig,
    title: &str,
    description: &str,
    labels: &str,
    color: Option<&str>,
) -> Result<(), CliError> {
    let color = parse_color(color)?;
    let store = open_store(config)?;

    store.open_create()?;
    store.update_draft(|draft| {
        draft.title = title.to_string();
        draft.description = description.to_string();
        draft.labels = labels.to_string();
        draft.color = color;
    })?;
    let note = store.submit().await?;

    println!("{}", note.id);
    Ok(())
}
