use stickies_core::ClientConfig;

use crate::commands::common::{open_store, print_lines, stdout_view};
use crate::error::CliError;
use crate::render::{note_to_list_item, page_footer, NoteListItem};

pub async fn run_list(
    config: &ClientConfig,
    label: Option<&str>,
    page: u32,
    as_json: bool,
) -> Result<(), CliError> {
    let store = open_store(config)?;
    store.show_page(label.unwrap_or_default(), page).await?;
    let snapshot = store.snapshot();

    if as_json {
        let json_items = snapshot
            .notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        print_lines(&stdout_view().note_list(&snapshot.notes));
        println!();
        println!(
            "{}",
            page_footer(snapshot.current_page, snapshot.total_pages, false)
        );
    }

    Ok(())
}
