//! Command enum definitions

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Run diagnostic checks on the configuration and the follow document
    Diagnose,

    /// Show an account, its state and the actions available for it
    #[command(alias = "search")]
    Show(UsernameArgs),

    /// Record that you followed an account
    Follow(EventArgs),

    /// Record that an account followed you back
    FollowBack(EventArgs),

    /// Record that you unfollowed an account
    Unfollow(EventArgs),

    /// Show the event history of an account
    History(UsernameArgs),

    /// List tracked accounts
    #[command(
        alias = "ls",
        long_about = r#"
List tracked accounts, optionally filtered by state and sorted.

STATES:
  • followed (seguido) - You follow them but they do not follow you
  • mutual (mutuo) - You follow each other
  • not-followed (no_seguido) - You do not follow them
  • follows-you (te_sigue) - They follow you but you do not follow them
  • previously-followed (seguido_previamente) - You followed them in the past

SORT KEYS:
  • username
  • last-interaction (fecha_ultima_interaccion)
  • state (estado_actual)

An unknown sort key keeps the stored order.
"#
    )]
    List(ListArgs),

    /// Show counts per state and the follow-back rate
    Stats,

    /// Open an account's profile in the browser
    Open(OpenArgs),

    /// Export all accounts to a CSV file (history is not included)
    Export(FileArgs),

    /// Import accounts from a CSV file; tracked accounts are left untouched
    Import(FileArgs),

    /// Write a backup copy of the follow document
    Backup(BackupArgs),

    /// Replace all accounts with the contents of a backup
    Restore(BackupArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
