//! Command argument structures
//!
//! This module contains the top-level parser and the argument structs used by
//! the individual commands.

use crate::commands::Commands;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "follow-tracker")]
#[command(about = "Track who you follow, who follows you back, and when it changed", long_about = None)]
#[command(version = follow_tracker::VERSION)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the follow document
    #[arg(long, short, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    pub output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    pub machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (only errors are logged)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct UsernameArgs {
    /// Username, with or without the leading @
    pub username: String,
}

#[derive(Args)]
pub struct EventArgs {
    /// Username, with or without the leading @
    pub username: String,

    /// Date of the event (YYYY-MM-DD or DD/MM/YYYY); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Record the event even if the current state does not offer it
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show accounts in this state (e.g. mutual, follows-you, seguido)
    #[arg(long, short)]
    pub state: Option<String>,

    /// Sort by username, last-interaction or state
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort in descending order
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Username, with or without the leading @
    pub username: String,

    /// Print the profile URL instead of opening the browser
    #[arg(long)]
    pub print_only: bool,
}

#[derive(Args)]
pub struct FileArgs {
    /// Path of the file
    pub path: PathBuf,
}

#[derive(Args)]
pub struct BackupArgs {
    /// Backup file; defaults to the configured backup file in the data directory
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
