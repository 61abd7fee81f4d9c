//! Snapshot persistence for the catalog.
//!
//! # Responsibility
//! - Define the backend-agnostic snapshot store contract.
//! - Provide the local JSON file and SQLite document backends.
//! - Chain backends so loads and saves fall back in a fixed order.
//!
//! # Invariants
//! - `save_snapshot` replaces the whole persisted set with exactly the
//!   given items.
//! - A save/load cycle recovers variant, id and every subtype field.

use crate::db::DbError;
use crate::model::item::Item;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod chain;
pub mod document_db;
pub mod json_file;

pub use chain::{LoadOutcome, SnapshotChain};
pub use document_db::SqliteDocumentStore;
pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot persistence failure.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Db(DbError),
    /// Persisted data decoded but violates the item contract.
    InvalidData(String),
    /// The chain has no store to talk to.
    NoStores,
    /// Every store in the chain failed; one `name: error` line per store.
    AllStoresFailed(Vec<String>),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
            Self::NoStores => write!(f, "no snapshot store configured"),
            Self::AllStoresFailed(failures) => {
                write!(f, "every snapshot store failed: {}", failures.join("; "))
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::NoStores | Self::AllStoresFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Backend that can load and replace a full catalog snapshot.
pub trait SnapshotStore {
    /// Short stable name used in logs and load outcomes.
    fn name(&self) -> &str;

    /// Returns every persisted item in persisted order.
    fn load_snapshot(&self) -> StoreResult<Vec<Item>>;

    /// Replaces the persisted set with exactly `items`.
    fn save_snapshot(&self, items: &[Item]) -> StoreResult<()>;
}
