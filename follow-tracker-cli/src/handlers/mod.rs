//! Command handlers for the FollowTracker CLI

pub mod account;
pub mod diagnose;
pub mod listing;
pub mod transfer;

pub use account::{
    ProfileLink, handle_history, handle_open, handle_record_event, handle_show, profile_link,
};
pub use diagnose::handle_diagnose;
pub use listing::{handle_list, handle_stats, select_accounts};
pub use transfer::{handle_backup, handle_export, handle_import, handle_restore};
