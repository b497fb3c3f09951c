//! Trait definitions for persistence adapters

use std::fmt::Debug;

use crate::models::Account;
use crate::storage::errors::StorageResult;

/// Whole-collection persistence for tracked accounts.
///
/// Implementations load and save the entire collection at once; there is no
/// partial persistence of a subset of records.
pub trait AccountRepository: Debug {
    /// Load every stored account, or an empty collection when nothing has been saved yet
    fn load(&self) -> StorageResult<Vec<Account>>;

    /// Replace the stored collection with `accounts`
    fn save(&mut self, accounts: &[Account]) -> StorageResult<()>;

    /// Human readable description of where the data lives
    fn location(&self) -> String;
}
