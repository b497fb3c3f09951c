use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::statistics::{FollowStatistics, SortCriteria};
use crate::models::{
    Account, Event, EventKind, RelationshipState, UsernameRules, normalize_username,
    validate_username,
};
use crate::storage::{AccountRepository, StorageError, read_document, write_document};
use crate::{FollowTrackerError, Result};

/// Outcome of merging imported accounts into the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Usernames added to the collection
    pub imported: Vec<String>,

    /// Usernames that were already tracked
    pub skipped_existing: Vec<String>,

    /// Inputs that failed username validation
    pub rejected: Vec<String>,
}

/// The account collection and the repository it is persisted to.
///
/// The whole collection is loaded on [`open`](Self::open) and written back
/// after every mutation. A failed write leaves the in-memory collection as it
/// was before the call.
#[derive(Debug)]
pub struct RelationshipStore<R: AccountRepository> {
    repository: R,
    rules: UsernameRules,
    accounts: Vec<Account>,
}

enum Undo {
    Remove,
    Restore(usize, Box<Account>),
}

impl<R: AccountRepository> RelationshipStore<R> {
    /// Load the collection from `repository`.
    ///
    /// States of accounts with a history are recomputed; history-less
    /// accounts (from CSV imports) keep their stored state.
    pub fn open(repository: R, rules: UsernameRules) -> Result<Self> {
        let mut accounts = repository.load()?;
        let mut corrected = 0;
        for account in accounts.iter_mut().filter(|a| !a.events.is_empty()) {
            let stored = account.current_state;
            account.recompute_state();
            if stored != account.current_state {
                corrected += 1;
            }
        }

        debug!(
            location = %repository.location(),
            accounts = accounts.len(),
            corrected,
            "relationship store opened"
        );

        Ok(Self {
            repository,
            rules,
            accounts,
        })
    }

    /// All accounts in collection order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn rules(&self) -> &UsernameRules {
        &self.rules
    }

    /// Validate `input` and return its normalized form
    pub fn normalize(&self, input: &str) -> Result<String> {
        validate_username(input, &self.rules).map_err(|reason| {
            FollowTrackerError::InvalidUsername {
                input: input.to_string(),
                reason,
            }
        })
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.username == username)
    }

    /// Look up an account; any spelling that normalizes the same matches
    pub fn find(&self, username: &str) -> Option<&Account> {
        let username = normalize_username(username);
        self.accounts.iter().find(|a| a.username == username)
    }

    /// Like [`find`](Self::find), but a missing account is an error
    pub fn get(&self, username: &str) -> Result<&Account> {
        self.find(username)
            .ok_or_else(|| FollowTrackerError::AccountNotFound {
                username: normalize_username(username),
            })
    }

    /// Ordered event history of an account
    pub fn history(&self, username: &str) -> Result<&[Event]> {
        Ok(&self.get(username)?.events)
    }

    /// Record `kind` for `username` on `date` and persist the collection.
    ///
    /// Unknown usernames get a new account. The username is validated before
    /// anything changes. Availability of the action for the current state is
    /// not checked here; see [`Account::allows`].
    pub fn record_event(&mut self, username: &str, kind: EventKind, date: NaiveDate) -> Result<&Account> {
        let username = self.normalize(username)?;
        let event = Event::new(kind, date);

        let (index, undo) = match self.position(&username) {
            Some(index) => {
                let before = Box::new(self.accounts[index].clone());
                self.accounts[index].apply(event);
                (index, Undo::Restore(index, before))
            }
            None => {
                self.accounts.push(Account::from_event(username.clone(), event));
                (self.accounts.len() - 1, Undo::Remove)
            }
        };

        if let Err(err) = self.persist() {
            match undo {
                Undo::Remove => {
                    self.accounts.pop();
                }
                Undo::Restore(index, before) => self.accounts[index] = *before,
            }
            warn!(%username, kind = %kind, error = %err, "event not recorded, save failed");
            return Err(err);
        }

        let account = &self.accounts[index];
        info!(
            %username,
            kind = %kind,
            date = %date,
            state = %account.current_state,
            "event recorded"
        );
        Ok(account)
    }

    /// Accounts in `state`, or all accounts, in collection order
    pub fn filter(&self, state: Option<RelationshipState>) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| state.is_none_or(|s| a.current_state == s))
            .collect()
    }

    pub fn statistics(&self) -> FollowStatistics {
        FollowStatistics::from_accounts(&self.accounts)
    }

    /// Stable sort of the collection by `criteria`
    pub fn sort(&self, criteria: SortCriteria, descending: bool) -> Vec<&Account> {
        sort_accounts(self.accounts.iter().collect(), criteria, descending)
    }

    /// Sort by a criteria name; an unrecognised name leaves the order unchanged
    pub fn sort_by_name(&self, criteria: &str, descending: bool) -> Vec<&Account> {
        match criteria.parse::<SortCriteria>() {
            Ok(criteria) => self.sort(criteria, descending),
            Err(_) => {
                debug!(criteria, "unknown sort criteria, keeping collection order");
                self.accounts.iter().collect()
            }
        }
    }

    /// Merge imported accounts, skipping invalid and already tracked usernames.
    ///
    /// The collection is persisted once, and only when something was added.
    pub fn import_accounts(&mut self, incoming: Vec<Account>) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut seen: HashSet<String> = self.accounts.iter().map(|a| a.username.clone()).collect();
        let original_len = self.accounts.len();

        for mut account in incoming {
            let username = match validate_username(&account.username, &self.rules) {
                Ok(username) => username,
                Err(reason) => {
                    warn!(input = %account.username, %reason, "skipping invalid username in import");
                    summary.rejected.push(account.username);
                    continue;
                }
            };

            if !seen.insert(username.clone()) {
                summary.skipped_existing.push(username);
                continue;
            }

            account.username = username.clone();
            if !account.events.is_empty() {
                account.recompute_state();
            }
            self.accounts.push(account);
            summary.imported.push(username);
        }

        if !summary.imported.is_empty()
            && let Err(err) = self.persist()
        {
            self.accounts.truncate(original_len);
            return Err(err);
        }

        info!(
            imported = summary.imported.len(),
            skipped = summary.skipped_existing.len(),
            rejected = summary.rejected.len(),
            "accounts imported"
        );
        Ok(summary)
    }

    /// Write the current collection to a backup document at `path`
    pub fn backup(&self, path: &Path) -> Result<usize> {
        write_document(path, &self.accounts)?;
        info!(path = %path.display(), accounts = self.accounts.len(), "backup written");
        Ok(self.accounts.len())
    }

    /// Replace the collection with the backup document at `path` and persist it
    pub fn restore(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Err(StorageError::NotFound(format!("backup {}", path.display())).into());
        }

        let mut restored = read_document(path)?;
        for account in restored.iter_mut().filter(|a| !a.events.is_empty()) {
            account.recompute_state();
        }

        let previous = std::mem::replace(&mut self.accounts, restored);
        if let Err(err) = self.persist() {
            self.accounts = previous;
            return Err(err);
        }

        info!(path = %path.display(), accounts = self.accounts.len(), "backup restored");
        Ok(self.accounts.len())
    }

    fn persist(&mut self) -> Result<()> {
        self.repository.save(&self.accounts)?;
        Ok(())
    }
}

fn sort_accounts(mut accounts: Vec<&Account>, criteria: SortCriteria, descending: bool) -> Vec<&Account> {
    if descending {
        accounts.sort_by(|a, b| criteria.compare(b, a));
    } else {
        accounts.sort_by(|a, b| criteria.compare(a, b));
    }
    accounts
}

/// Profile link for `username`: the handle without `@` substituted into
/// `template` at `{username}`.
pub fn profile_url(username: &str, template: &str) -> String {
    let normalized = normalize_username(username);
    let handle = normalized.trim_start_matches('@');
    template.replace("{username}", handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use tempfile::tempdir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn empty_store() -> RelationshipStore<InMemoryStore> {
        RelationshipStore::open(InMemoryStore::new(), UsernameRules::default()).unwrap()
    }

    fn names(accounts: &[&Account]) -> Vec<String> {
        accounts.iter().map(|a| a.username.clone()).collect()
    }

    #[test]
    fn test_record_event_creates_and_updates_accounts() {
        let mut store = empty_store();

        let account = store.record_event("Alice", EventKind::Followed, day(1)).unwrap();
        assert_eq!(account.username, "@alice");
        assert_eq!(account.current_state, RelationshipState::Followed);
        assert_eq!(account.first_followed_date, Some(day(1)));

        let account = store
            .record_event(" @ALICE ", EventKind::FollowedBack, day(2))
            .unwrap();
        assert_eq!(account.events.len(), 2);
        assert_eq!(account.first_followed_date, Some(day(1)));
        assert_eq!(account.last_interaction_date, Some(day(2)));
        assert_eq!(account.current_state, RelationshipState::FollowsYou);

        assert_eq!(store.accounts().len(), 1);
        assert_eq!(store.repository().save_count(), 2);
        assert_eq!(store.repository().accounts(), store.accounts());
    }

    #[test]
    fn test_invalid_username_changes_nothing() {
        let mut store = empty_store();
        let err = store
            .record_event("not valid", EventKind::Followed, day(1))
            .unwrap_err();

        assert!(matches!(err, FollowTrackerError::InvalidUsername { .. }));
        assert!(store.accounts().is_empty());
        assert_eq!(store.repository().save_count(), 0);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut alice = Account::from_event("@alice", Event::new(EventKind::Followed, day(1)));
        alice.recompute_state();
        let repo = InMemoryStore::with_accounts(vec![alice.clone()]).fail_saves(true);
        let mut store = RelationshipStore::open(repo, UsernameRules::default()).unwrap();

        let err = store
            .record_event("alice", EventKind::Unfollowed, day(3))
            .unwrap_err();
        assert!(matches!(err, FollowTrackerError::Storage(_)));
        assert_eq!(store.accounts(), &[alice]);

        assert!(store.record_event("bob", EventKind::Followed, day(3)).is_err());
        assert!(store.find("bob").is_none());
    }

    #[test]
    fn test_find_and_history() {
        let mut store = empty_store();
        store.record_event("bob", EventKind::Followed, day(1)).unwrap();
        store.record_event("bob", EventKind::Unfollowed, day(4)).unwrap();

        assert!(store.find("BOB").is_some());
        assert!(store.find("carol").is_none());

        let history = store.history("@bob").unwrap();
        let kinds: Vec<_> = history.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Followed, EventKind::Unfollowed]);

        assert!(matches!(
            store.history("carol"),
            Err(FollowTrackerError::AccountNotFound { username }) if username == "@carol"
        ));
    }

    #[test]
    fn test_open_recomputes_state_only_for_accounts_with_history() {
        let mut stale = Account::from_event("@alice", Event::new(EventKind::Unfollowed, day(2)));
        stale.current_state = RelationshipState::Mutual;
        let mut imported = Account::new("@bob");
        imported.current_state = RelationshipState::FollowsYou;

        let repo = InMemoryStore::with_accounts(vec![stale, imported]);
        let store = RelationshipStore::open(repo, UsernameRules::default()).unwrap();

        assert_eq!(
            store.find("alice").unwrap().current_state,
            RelationshipState::PreviouslyFollowed
        );
        assert_eq!(
            store.find("bob").unwrap().current_state,
            RelationshipState::FollowsYou
        );
    }

    #[test]
    fn test_filter_keeps_collection_order() {
        let mut store = empty_store();
        store.record_event("zed", EventKind::Followed, day(1)).unwrap();
        store.record_event("amy", EventKind::FollowedBack, day(2)).unwrap();
        store.record_event("kim", EventKind::Followed, day(3)).unwrap();

        assert_eq!(
            names(&store.filter(Some(RelationshipState::Followed))),
            vec!["@zed", "@kim"]
        );
        assert_eq!(store.filter(None).len(), 3);
        assert!(store.filter(Some(RelationshipState::Mutual)).is_empty());
    }

    #[test]
    fn test_sort_by_each_criteria() {
        let mut store = empty_store();
        store.record_event("zed", EventKind::Followed, day(3)).unwrap();
        store.record_event("amy", EventKind::Unfollowed, day(1)).unwrap();
        store.record_event("kim", EventKind::FollowedBack, day(2)).unwrap();

        assert_eq!(
            names(&store.sort(SortCriteria::Username, false)),
            vec!["@amy", "@kim", "@zed"]
        );
        assert_eq!(
            names(&store.sort(SortCriteria::LastInteraction, true)),
            vec!["@zed", "@kim", "@amy"]
        );
        // seguido < seguido_previamente < te_sigue
        assert_eq!(
            names(&store.sort_by_name("estado_actual", false)),
            vec!["@zed", "@amy", "@kim"]
        );
        assert_eq!(
            names(&store.sort_by_name("popularity", true)),
            vec!["@zed", "@amy", "@kim"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut store = empty_store();
        store.record_event("b", EventKind::Followed, day(1)).unwrap();
        store.record_event("a", EventKind::Followed, day(1)).unwrap();
        store.record_event("c", EventKind::Followed, day(1)).unwrap();

        assert_eq!(
            names(&store.sort(SortCriteria::LastInteraction, false)),
            vec!["@b", "@a", "@c"]
        );
        assert_eq!(
            names(&store.sort(SortCriteria::State, true)),
            vec!["@b", "@a", "@c"]
        );
    }

    #[test]
    fn test_statistics_follow_recorded_events() {
        let mut store = empty_store();
        for name in ["a", "b", "c"] {
            store.record_event(name, EventKind::Followed, day(1)).unwrap();
        }
        store.record_event("d", EventKind::FollowedBack, day(1)).unwrap();

        let stats = store.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.followed, 3);
        assert_eq!(stats.follows_you, 1);
        assert_eq!(stats.follow_back_rate(), "0.0%");
    }

    #[test]
    fn test_import_merges_new_accounts_only() {
        let mut store = empty_store();
        store.record_event("alice", EventKind::Followed, day(1)).unwrap();

        let mut bob = Account::new("Bob");
        bob.current_state = RelationshipState::FollowsYou;
        let incoming = vec![
            Account::new("@alice"),
            bob,
            Account::new("bad name"),
            Account::new("@bob"),
        ];

        let summary = store.import_accounts(incoming).unwrap();
        assert_eq!(summary.imported, vec!["@bob"]);
        assert_eq!(summary.skipped_existing, vec!["@alice", "@bob"]);
        assert_eq!(summary.rejected, vec!["bad name"]);

        let bob = store.find("bob").unwrap();
        assert_eq!(bob.current_state, RelationshipState::FollowsYou);
        assert!(bob.events.is_empty());
        assert_eq!(store.repository().save_count(), 2);
    }

    #[test]
    fn test_import_with_nothing_new_does_not_save() {
        let mut store = empty_store();
        let summary = store.import_accounts(vec![Account::new("")]).unwrap();
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(store.repository().save_count(), 0);
    }

    #[test]
    fn test_failed_import_save_keeps_original_accounts() {
        let mut alice = Account::from_event("@alice", Event::new(EventKind::Followed, day(1)));
        alice.recompute_state();
        let repo = InMemoryStore::with_accounts(vec![alice.clone()]).fail_saves(true);
        let mut store = RelationshipStore::open(repo, UsernameRules::default()).unwrap();

        let err = store
            .import_accounts(vec![Account::new("bob"), Account::new("carol")])
            .unwrap_err();

        assert!(matches!(err, FollowTrackerError::Storage(_)));
        assert_eq!(store.accounts(), &[alice]);
        assert!(store.find("bob").is_none());
        assert!(store.find("carol").is_none());
    }

    #[test]
    fn test_failed_restore_save_keeps_previous_collection() {
        let dir = tempdir().unwrap();
        let backup = dir.path().join("backup.yaml");
        let mut bob = Account::from_event("@bob", Event::new(EventKind::FollowedBack, day(2)));
        bob.recompute_state();
        write_document(&backup, &[bob]).unwrap();

        let mut alice = Account::from_event("@alice", Event::new(EventKind::Followed, day(1)));
        alice.recompute_state();
        let repo = InMemoryStore::with_accounts(vec![alice.clone()]).fail_saves(true);
        let mut store = RelationshipStore::open(repo, UsernameRules::default()).unwrap();

        let err = store.restore(&backup).unwrap_err();

        assert!(matches!(err, FollowTrackerError::Storage(_)));
        assert_eq!(store.accounts(), &[alice]);
        assert!(store.find("bob").is_none());
    }

    #[test]
    fn test_backup_and_restore() {
        let dir = tempdir().unwrap();
        let backup = dir.path().join("backup.yaml");

        let mut store = empty_store();
        store.record_event("alice", EventKind::Followed, day(1)).unwrap();
        assert_eq!(store.backup(&backup).unwrap(), 1);

        store.record_event("bob", EventKind::Followed, day(2)).unwrap();
        assert_eq!(store.restore(&backup).unwrap(), 1);
        assert!(store.find("bob").is_none());
        assert_eq!(store.repository().accounts().len(), 1);

        assert!(store.restore(&dir.path().join("missing.yaml")).is_err());
        assert_eq!(store.accounts().len(), 1);
    }

    #[test]
    fn test_profile_url() {
        let template = "https://instagram.com/{username}";
        assert_eq!(profile_url("@Alice", template), "https://instagram.com/alice");
        assert_eq!(profile_url("bob.b", template), "https://instagram.com/bob.b");
    }
}
