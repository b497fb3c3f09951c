//! End-to-end tests of the file-backed relationship store

use chrono::NaiveDate;
use follow_tracker::config::ConfigBuilder;
use follow_tracker::core::{RelationshipStore, SortCriteria};
use follow_tracker::interchange::{export_csv_file, import_csv_file};
use follow_tracker::models::{EventKind, RelationshipState, UsernameRules};
use follow_tracker::storage::{YamlFileStore, create_repository};
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn open(path: &std::path::Path) -> RelationshipStore<YamlFileStore> {
    RelationshipStore::open(YamlFileStore::new(path), UsernameRules::default()).unwrap()
}

#[test]
fn test_follow_then_follow_back_is_persisted() {
    let dir = tempdir().unwrap();
    let config = ConfigBuilder::new().with_data_dir(dir.path()).build().unwrap();
    let mut store =
        RelationshipStore::open(create_repository(&config), config.validation).unwrap();

    store.record_event("alice", EventKind::Followed, day(1)).unwrap();
    store.record_event("alice", EventKind::FollowedBack, day(2)).unwrap();

    let reopened = open(&config.storage.data_path());
    let alice = reopened.find("@alice").unwrap();
    assert_eq!(alice.first_followed_date, Some(day(1)));
    assert_eq!(alice.last_interaction_date, Some(day(2)));
    assert_eq!(alice.events.len(), 2);
    assert_eq!(alice.current_state, RelationshipState::FollowsYou);

    // Following again after the follow-back keeps the first follow date
    drop(reopened);
    let mut store = open(&config.storage.data_path());
    let alice = store.record_event("alice", EventKind::Followed, day(5)).unwrap();
    assert_eq!(alice.first_followed_date, Some(day(1)));
    assert_eq!(alice.current_state, RelationshipState::Followed);
}

#[test]
fn test_save_then_load_reproduces_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("follows.yaml");

    let mut store = open(&path);
    store.record_event("zed", EventKind::Followed, day(1)).unwrap();
    store.record_event("amy", EventKind::FollowedBack, day(2)).unwrap();
    store.record_event("zed", EventKind::Unfollowed, day(3)).unwrap();

    let reopened = open(&path);
    assert_eq!(reopened.accounts(), store.accounts());
    assert_eq!(
        reopened
            .sort(SortCriteria::Username, false)
            .iter()
            .map(|a| a.username.as_str())
            .collect::<Vec<_>>(),
        vec!["@amy", "@zed"]
    );
}

#[test]
fn test_unreadable_document_is_an_error_not_a_reset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("follows.yaml");
    std::fs::write(&path, "username: [unterminated").unwrap();

    let result = RelationshipStore::open(YamlFileStore::new(&path), UsernameRules::default());
    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "username: [unterminated"
    );
}

#[test]
fn test_csv_export_then_import_into_fresh_store() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("export.csv");

    let mut source = open(&dir.path().join("a.yaml"));
    source.record_event("alice", EventKind::Followed, day(1)).unwrap();
    source.record_event("bob", EventKind::FollowedBack, day(2)).unwrap();
    export_csv_file(&csv, source.accounts()).unwrap();

    let mut target = open(&dir.path().join("b.yaml"));
    target.record_event("bob", EventKind::Followed, day(9)).unwrap();
    let summary = target.import_accounts(import_csv_file(&csv).unwrap()).unwrap();

    assert_eq!(summary.imported, vec!["@alice"]);
    assert_eq!(summary.skipped_existing, vec!["@bob"]);

    let reopened = open(&dir.path().join("b.yaml"));
    let alice = reopened.find("alice").unwrap();
    assert!(alice.events.is_empty());
    assert_eq!(alice.current_state, RelationshipState::Followed);
    assert_eq!(alice.first_followed_date, Some(day(1)));
}
