//! Domain models for tracked accounts, their events, and derived states

pub mod account;
pub mod username;

// Re-export important models
pub use account::{Account, Event, EventKind, RelationshipState, derive_state};
pub use username::{UsernameError, UsernameRules, normalize_username, validate_username};
