use stickies_core::ClientConfig;

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_labels(config: &ClientConfig, as_json: bool) -> Result<(), CliError> {
    let store = open_store(config)?;
    store.load_labels().await?;
    let labels = store.snapshot().unique_labels;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&labels)?);
    } else {
        for label in labels {
            println!("#{label}");
        }
    }
    Ok(())
}
