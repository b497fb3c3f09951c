//! Persistence adapters for the relationship store.
//!
//! The store always loads and saves the whole collection. [`YamlFileStore`]
//! is the on-disk document; [`InMemoryStore`] backs tests and dry runs.

pub mod errors;
pub mod memory;
pub mod traits;
pub mod yaml;

pub use errors::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use traits::AccountRepository;
pub use yaml::{YamlFileStore, read_document, write_document};

use crate::config::FollowTrackerConfig;

/// Create the file-backed repository described by `config`
pub fn create_repository(config: &FollowTrackerConfig) -> YamlFileStore {
    YamlFileStore::new(config.storage.data_path())
}
