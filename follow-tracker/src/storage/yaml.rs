//! YAML document persistence

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::errors::{StorageError, StorageResult};
use super::traits::AccountRepository;
use crate::models::Account;

/// Read a YAML document of accounts.
///
/// A missing or blank file is an empty collection; anything unparseable is a
/// [`StorageError::Serialization`].
pub fn read_document(path: &Path) -> StorageResult<Vec<Account>> {
    if !path.exists() {
        debug!(path = %path.display(), "no document yet, starting empty");
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let accounts: Option<Vec<Account>> = serde_yaml::from_str(&raw).map_err(|e| {
        StorageError::Serialization(format!("{}: {}", path.display(), e))
    })?;

    Ok(accounts.unwrap_or_default())
}

/// Write `accounts` as a YAML document, replacing `path` atomically.
pub fn write_document(path: &Path, accounts: &[Account]) -> StorageResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    let mut tmp = NamedTempFile::new_in(&dir)?;
    serde_yaml::to_writer(&mut tmp, accounts)?;
    tmp.flush()?;
    tmp.persist(path)?;

    debug!(path = %path.display(), accounts = accounts.len(), "document written");
    Ok(())
}

/// Repository backed by a single YAML file
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountRepository for YamlFileStore {
    fn load(&self) -> StorageResult<Vec<Account>> {
        read_document(&self.path)
    }

    fn save(&mut self, accounts: &[Account]) -> StorageResult<()> {
        write_document(&self.path, accounts)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, EventKind};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_missing_and_blank_documents_are_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("follows.yaml");
        assert!(read_document(&path).unwrap().is_empty());

        fs::write(&path, "\n  \n").unwrap();
        assert!(read_document(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let mut store = YamlFileStore::new(dir.path().join("nested").join("follows.yaml"));

        let mut alice = Account::from_event("@alice", Event::new(EventKind::Followed, day(1)));
        alice.apply(Event::new(EventKind::Unfollowed, day(4)));
        let bob = Account::from_event("@bob", Event::new(EventKind::FollowedBack, day(2)));
        let accounts = vec![alice, bob];

        store.save(&accounts).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, accounts);
    }

    #[test]
    fn test_document_uses_original_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("follows.yaml");
        let account = Account::from_event("@alice", Event::new(EventKind::Followed, day(1)));

        write_document(&path, &[account]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();

        for key in [
            "username",
            "estado_actual",
            "fecha_primer_seguimiento",
            "fecha_ultima_interaccion",
            "eventos",
            "tipo",
            "fecha",
        ] {
            assert!(raw.contains(key), "missing key {key} in:\n{raw}");
        }
        assert!(raw.contains("2024-03-01"));
    }

    #[test]
    fn test_reads_document_written_by_older_versions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("follows.yaml");
        fs::write(
            &path,
            r#"- estado_actual: seguido
  eventos:
  - fecha: '2024-03-01'
    tipo: seguido
  fecha_primer_seguimiento: '2024-03-01'
  fecha_ultima_interaccion: '2024-03-01'
  username: '@alice'
- estado_actual: te_sigue
  eventos:
  - fecha: '2024-03-02'
    tipo: follow_back
  fecha_primer_seguimiento: null
  fecha_ultima_interaccion: '2024-03-02'
  username: '@bob'
"#,
        )
        .unwrap();

        let accounts = read_document(&path).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].first_followed_date, None);
        assert_eq!(accounts[1].events[0].kind, EventKind::FollowedBack);
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("follows.yaml");
        fs::write(&path, "username: [unterminated").unwrap();

        assert!(matches!(
            read_document(&path),
            Err(StorageError::Serialization(_))
        ));
    }
}
