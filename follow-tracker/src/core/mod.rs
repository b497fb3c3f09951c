//! The relationship store and the read-only views computed from it.
//!
//! [`RelationshipStore`] owns the account collection. Every mutation goes
//! through it and is persisted before it returns; callers only ever see
//! borrowed snapshots.

mod statistics;
mod store;

pub use statistics::{FollowStatistics, SortCriteria};
pub use store::{ImportSummary, RelationshipStore, profile_url};
