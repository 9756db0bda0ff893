use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "stickies")]
#[command(about = "Manage a remote list of labelled sticky notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Notes API base URL (overrides STICKIES_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of notes
    #[command(alias = "ls")]
    List {
        /// Only show notes carrying this label
        #[arg(short, long)]
        label: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every label in use
    Labels {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// Space or comma separated labels
        #[arg(short, long)]
        labels: String,
        /// Card color (random when omitted)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Space or comma separated labels, replacing the current ones
        #[arg(short, long)]
        labels: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: String,
    },
    /// Mark a note complete, or open again if already complete
    Toggle {
        /// Note ID
        id: String,
    },
    /// Interactive session over the note list
    Shell,
    /// Manage the CLI config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file
    Init {
        /// Notes API base URL
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
        /// Per-request timeout in seconds, 0 disables it
        #[arg(long, value_name = "SECONDS")]
        timeout_secs: Option<u64>,
        /// Quiet interval before a filter change refetches (minimum 500)
        #[arg(long, value_name = "MILLIS")]
        filter_debounce_ms: Option<u64>,
    },
    /// Print the resolved configuration
    Show,
}
