//! # FollowTracker
//!
//! Tracks manual follow relationships on a social network: who you follow,
//! who follows you back, and how each relationship changed over time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use follow_tracker::prelude::*;
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<()> {
//!     let config = ConfigBuilder::new().with_data_dir("./data").build()?;
//!     let (mut store, _log_guard) = init(&config)?;
//!
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date");
//!     let account = store.record_event("Alice", EventKind::Followed, date)?;
//!     println!("{} is now {}", account.username, account.current_state);
//!
//!     println!("Follow-back rate: {}", store.statistics().follow_back_rate());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Models**: accounts, events and the state derivation rule
//! - **Core**: the [`RelationshipStore`](core::RelationshipStore), which owns
//!   the collection and persists it after every change
//! - **Storage**: whole-document persistence (YAML file or in memory)
//! - **Interchange**: flat CSV export and import

pub mod config;
pub mod core;
pub mod interchange;
pub mod logging;
pub mod models;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::init;

    pub use crate::config::{ConfigBuilder, ConfigLoader, FollowTrackerConfig, LogLevel};

    pub use crate::models::{
        Account, Event, EventKind, RelationshipState, UsernameError, UsernameRules,
        normalize_username, validate_username,
    };

    pub use crate::core::{FollowStatistics, ImportSummary, RelationshipStore, SortCriteria};

    pub use crate::storage::{
        AccountRepository, InMemoryStore, StorageError, YamlFileStore,
    };

    pub use crate::{FollowTrackerError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for FollowTracker operations
#[derive(Debug, thiserror::Error)]
pub enum FollowTrackerError {
    /// Error reading or writing the document
    #[error("Storage error: {0}")]
    Storage(String),

    /// A username failed validation; nothing was changed
    #[error("Invalid username '{input}': {reason}")]
    InvalidUsername {
        input: String,
        reason: models::UsernameError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// No record exists for the username
    #[error("Account {username} is not tracked yet")]
    AccountNotFound { username: String },

    /// The action is not offered for the account's current state
    #[error("Cannot record '{kind}' for {username} while the state is '{state}'")]
    ActionNotAllowed {
        username: String,
        kind: models::EventKind,
        state: models::RelationshipState,
    },

    /// CSV export or import failed
    #[error("Interchange error: {0}")]
    Interchange(String),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for FollowTrackerError {
    fn from(err: crate::config::ConfigError) -> Self {
        FollowTrackerError::Configuration(err.to_string())
    }
}

/// Result type for FollowTracker operations
pub type Result<T> = std::result::Result<T, FollowTrackerError>;

/// Open the file-backed relationship store described by `config`.
///
/// Logging is initialized first; an already installed subscriber is kept.
/// When `config.logging.file` is set the returned guard flushes the log file,
/// so hold it for as long as the store is in use.
///
/// # Examples
///
/// ```rust,no_run
/// use follow_tracker::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::new().with_data_dir("/tmp/follows").build()?;
///     let (store, _log_guard) = init(&config)?;
///     println!("{} accounts tracked", store.accounts().len());
///     Ok(())
/// }
/// ```
pub fn init(
    config: &config::FollowTrackerConfig,
) -> Result<(
    core::RelationshipStore<storage::YamlFileStore>,
    Option<logging::WorkerGuard>,
)> {
    let guard = logging::init(&config.logging)?;

    let repository = storage::create_repository(config);
    let store = core::RelationshipStore::open(repository, config.validation)?;
    Ok((store, guard))
}
