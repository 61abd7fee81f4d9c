//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist each item as one JSON document keyed by id, with its kind as a
//!   discriminator column.
//! - Replace the full document set atomically on save.
//!
//! # Invariants
//! - Save is delete-all-then-insert-all inside one transaction.
//! - Load preserves saved order via the `position` column.
//! - Load rejects rows whose id/kind columns disagree with the document.

use super::{SnapshotStore, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory, ping};
use crate::model::item::{Item, ItemId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::path::Path;

const STORE_NAME: &str = "document_db";

/// Document store over a SQLite database file.
pub struct SqliteDocumentStore {
    conn: Connection,
}

impl SqliteDocumentStore {
    /// Opens the database at `path` and checks that it answers.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        ping(&conn)?;
        Ok(Self { conn })
    }

    /// Opens a throwaway in-memory document store.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn })
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> StoreResult<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM item_documents;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        usize::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative document count `{count}`")))
    }
}

impl SnapshotStore for SqliteDocumentStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn load_snapshot(&self) -> StoreResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, document
             FROM item_documents
             ORDER BY position ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_document_row(row)?);
        }

        Ok(items)
    }

    fn save_snapshot(&self, items: &[Item]) -> StoreResult<()> {
        let documents = items
            .iter()
            .map(|item| -> StoreResult<_> {
                Ok((item.id, item.kind().as_str(), serde_json::to_string(item)?))
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM item_documents;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO item_documents (id, kind, position, document)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for (position, (id, kind, document)) in documents.iter().enumerate() {
                insert.execute(params![id, kind, position as i64, document])?;
            }
        }
        tx.commit()?;

        debug!(
            "event=document_save module=store status=ok removed={} inserted={}",
            removed,
            documents.len()
        );
        Ok(())
    }
}

fn parse_document_row(row: &Row<'_>) -> StoreResult<Item> {
    let id: ItemId = row.get("id")?;
    let kind: String = row.get("kind")?;
    let document: String = row.get("document")?;

    let item: Item = serde_json::from_str(&document).map_err(|err| {
        StoreError::InvalidData(format!("undecodable document for item {id}: {err}"))
    })?;

    if item.id != id {
        return Err(StoreError::InvalidData(format!(
            "document id {} does not match row id {id}",
            item.id
        )));
    }
    if item.kind().as_str() != kind {
        return Err(StoreError::InvalidData(format!(
            "document kind `{}` does not match row kind `{kind}` for item {id}",
            item.kind()
        )));
    }

    Ok(item)
}
