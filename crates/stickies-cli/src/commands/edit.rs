use stickies_core::ClientConfig;

use crate::commands::common::{normalize_note_identifier, open_store, parse_color};
use crate::error::CliError;

/// Field overrides for `stickies edit`; unset fields keep the server value.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<String>,
    pub color: Option<String>,
}

impl EditArgs {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.labels.is_none()
            && self.color.is_none()
    }
}

pub async fn run_edit(config: &ClientConfig, id: &str, args: EditArgs) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    if args.is_empty() {
        return Err(CliError::NothingToEdit);
    }
    let color = parse_color(args.color.as_deref())?;

    let store = open_store(config)?;
    store.open_edit(&id).await?;
    store.update_draft(|draft| {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(description) = args.description {
            draft.description = description;
        }
        if let Some(labels) = args.labels {
            draft.labels = labels;
        }
        if color.is_some() {
            draft.color = color;
        }
    })?;
    let note = store.submit().await?;

    println!("{}", note.id);
    Ok(())
}
