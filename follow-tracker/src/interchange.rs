//! Flat CSV export and import.
//!
//! The CSV form carries one row per account with the columns
//! `username, estado_actual, fecha_primer_seguimiento,
//! fecha_ultima_interaccion, total_eventos`. Event history is not part of the
//! format, so imported accounts start with an empty history.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::account::{STORAGE_DATE_FORMAT, parse_storage_date};
use crate::models::{Account, RelationshipState};
use crate::storage::StorageResult;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    username: String,
    #[serde(default)]
    estado_actual: String,
    #[serde(default)]
    fecha_primer_seguimiento: String,
    #[serde(default)]
    fecha_ultima_interaccion: String,
    #[serde(default)]
    total_eventos: Option<String>,
}

impl From<&Account> for CsvRow {
    fn from(account: &Account) -> Self {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format(STORAGE_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };

        Self {
            username: account.username.clone(),
            estado_actual: account.current_state.as_str().to_string(),
            fecha_primer_seguimiento: date(account.first_followed_date),
            fecha_ultima_interaccion: date(account.last_interaction_date),
            total_eventos: Some(account.total_events().to_string()),
        }
    }
}

impl CsvRow {
    fn into_account(self) -> Account {
        let state = self.estado_actual.parse().unwrap_or_else(|_| {
            if !self.estado_actual.trim().is_empty() {
                warn!(
                    username = %self.username,
                    state = %self.estado_actual,
                    "unknown state in CSV row, using no_seguido"
                );
            }
            RelationshipState::NotFollowed
        });

        Account {
            username: self.username,
            current_state: state,
            first_followed_date: parse_storage_date(&self.fecha_primer_seguimiento),
            last_interaction_date: parse_storage_date(&self.fecha_ultima_interaccion),
            events: Vec::new(),
        }
    }
}

/// Write `accounts` as CSV to `writer`
pub fn export_csv<W: Write>(writer: W, accounts: &[Account]) -> StorageResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for account in accounts {
        csv.serialize(CsvRow::from(account))?;
    }
    // An empty export still gets a header row.
    if accounts.is_empty() {
        csv.write_record([
            "username",
            "estado_actual",
            "fecha_primer_seguimiento",
            "fecha_ultima_interaccion",
            "total_eventos",
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `accounts` as CSV to the file at `path`
pub fn export_csv_file(path: &Path, accounts: &[Account]) -> StorageResult<()> {
    let file = File::create(path)?;
    export_csv(file, accounts)?;
    debug!(path = %path.display(), accounts = accounts.len(), "CSV exported");
    Ok(())
}

/// Read bare accounts (no event history) from CSV
pub fn import_csv<R: Read>(reader: R) -> StorageResult<Vec<Account>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut accounts = Vec::new();
    for row in csv.deserialize::<CsvRow>() {
        accounts.push(row?.into_account());
    }
    Ok(accounts)
}

/// Read bare accounts from the CSV file at `path`
pub fn import_csv_file(path: &Path) -> StorageResult<Vec<Account>> {
    let file = File::open(path)?;
    let accounts = import_csv(file)?;
    debug!(path = %path.display(), accounts = accounts.len(), "CSV read");
    Ok(accounts)
}
