//! SQLite plumbing behind [`crate::store::SqliteDocumentStore`].
//!
//! Only the document store opens connections. A failure here surfaces as
//! `StoreError::Db`, and the snapshot chain then falls back to the JSON
//! file.
//!
//! # Invariants
//! - The `item_documents` table exists on every connection handed out.
//! - Schema version lives in `PRAGMA user_version`; a newer file is refused
//!   rather than rewritten.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, ping};

pub type DbResult<T> = Result<T, DbError>;

/// Document database failure.
#[derive(Debug)]
pub enum DbError {
    /// Opening the file, applying the schema or running a statement failed.
    Sqlite(rusqlite::Error),
    /// The connection opened but did not answer the liveness check.
    Unreachable(rusqlite::Error),
    /// The file was written by a newer Biblio with a schema this build
    /// cannot read.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "document database error: {err}"),
            Self::Unreachable(err) => write!(f, "document database did not answer: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "item document schema v{found} is newer than supported v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Unreachable(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
