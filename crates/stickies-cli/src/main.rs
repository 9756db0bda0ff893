//! Stickies CLI - a terminal client for a remote list of labelled notes
//!
//! One-shot commands for scripting plus an interactive shell.

mod cli;
mod commands;
mod config;
mod error;
mod render;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::load_client_config;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditArgs};
use crate::commands::labels::run_labels;
use crate::commands::list::run_list;
use crate::commands::shell::run_shell;
use crate::commands::toggle::run_toggle;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stickies=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url;

    match cli.command {
        Some(Commands::List { label, page, json }) => {
            let config = load_client_config(api_url)?;
            run_list(&config, label.as_deref(), page, json).await?;
        }
        Some(Commands::Labels { json }) => {
            let config = load_client_config(api_url)?;
            run_labels(&config, json).await?;
        }
        Some(Commands::Add {
            title,
            description,
            labels,
            color,
        }) => {
            let config = load_client_config(api_url)?;
            run_add(&config, &title, &description, &labels, color.as_deref()).await?;
        }
        Some(Commands::Edit {
            id,
            title,
            description,
            labels,
            color,
        }) => {
            let config = load_client_config(api_url)?;
            let args = EditArgs {
                title,
                description,
                labels,
                color,
            };
            run_edit(&config, &id, args).await?;
        }
        Some(Commands::Delete { id }) => {
            let config = load_client_config(api_url)?;
            run_delete(&config, &id).await?;
        }
        Some(Commands::Toggle { id }) => {
            let config = load_client_config(api_url)?;
            run_toggle(&config, &id).await?;
        }
        Some(Commands::Shell) => {
            let config = load_client_config(api_url)?;
            run_shell(&config).await?;
        }
        Some(Commands::Config { command }) => run_config(command, api_url)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
