//! In-memory persistence, used for tests and dry runs

use super::errors::{StorageError, StorageResult};
use super::traits::AccountRepository;
use crate::models::Account;

/// Repository that keeps the saved collection in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    accounts: Vec<Account>,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-saved collection
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            ..Self::default()
        }
    }

    /// Make every subsequent save fail, simulating an unwritable document
    pub fn fail_saves(mut self, fail: bool) -> Self {
        self.fail_saves = fail;
        self
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// The last saved collection
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}

impl AccountRepository for InMemoryStore {
    fn load(&self) -> StorageResult<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn save(&mut self, accounts: &[Account]) -> StorageResult<()> {
        if self.fail_saves {
            return Err(StorageError::Operation(
                "in-memory store is read-only".to_string(),
            ));
        }
        self.accounts = accounts.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
