//! Ordered snapshot store fallback chain.
//!
//! # Invariants
//! - Stores are tried in registration order; the first success wins.
//! - A load that fails everywhere yields an empty catalog, never an error.
//! - A save that fails everywhere is returned to the caller, never dropped.

use super::{JsonFileStore, SnapshotStore, SqliteDocumentStore, StoreError, StoreResult};
use crate::model::item::Item;
use crate::settings::Settings;
use log::{error, info, warn};
use std::path::Path;
use std::time::Instant;

/// Result of a chained snapshot load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub items: Vec<Item>,
    /// Name of the store that satisfied the load, `None` for the empty fallback.
    pub source: Option<String>,
}

/// Snapshot stores tried in sequence.
#[derive(Default)]
pub struct SnapshotChain {
    stores: Vec<Box<dyn SnapshotStore>>,
}

impl SnapshotChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the chain described by `settings`.
    ///
    /// The document database comes first when configured; the JSON file is
    /// always last. A document database that cannot be opened is skipped.
    pub fn from_settings(settings: &Settings, data_dir: &Path) -> Self {
        let mut chain = Self::new();

        if let Some(db_path) = settings.resolve_database_path(data_dir) {
            match SqliteDocumentStore::open(&db_path) {
                Ok(store) => chain.push(store),
                Err(err) => warn!(
                    "event=store_open module=store status=fallback store=document_db error={err}"
                ),
            }
        }

        chain.push(JsonFileStore::new(settings.resolve_data_file(data_dir)));
        chain
    }

    /// Appends a store at the lowest priority.
    pub fn push(&mut self, store: impl SnapshotStore + 'static) {
        self.stores.push(Box::new(store));
    }

    pub fn with_store(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.push(store);
        self
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Store names in priority order.
    pub fn store_names(&self) -> Vec<&str> {
        self.stores.iter().map(|store| store.name()).collect()
    }

    /// Loads from the first store that answers.
    pub fn load(&self) -> LoadOutcome {
        let started_at = Instant::now();

        for store in &self.stores {
            match store.load_snapshot() {
                Ok(items) => {
                    info!(
                        "event=snapshot_load module=store status=ok store={} items={} duration_ms={}",
                        store.name(),
                        items.len(),
                        started_at.elapsed().as_millis()
                    );
                    return LoadOutcome {
                        items,
                        source: Some(store.name().to_string()),
                    };
                }
                Err(err) => warn!(
                    "event=snapshot_load module=store status=fallback store={} error={}",
                    store.name(),
                    err
                ),
            }
        }

        warn!(
            "event=snapshot_load module=store status=empty stores={} duration_ms={}",
            self.stores.len(),
            started_at.elapsed().as_millis()
        );
        LoadOutcome {
            items: Vec::new(),
            source: None,
        }
    }

    /// Saves to the first store that accepts the snapshot.
    ///
    /// Returns the name of the store that persisted it.
    ///
    /// # Errors
    /// - `NoStores` when the chain is empty.
    /// - `AllStoresFailed` when every store rejected the snapshot.
    pub fn save(&self, items: &[Item]) -> StoreResult<String> {
        if self.stores.is_empty() {
            return Err(StoreError::NoStores);
        }

        let started_at = Instant::now();
        let mut failures = Vec::new();

        for store in &self.stores {
            match store.save_snapshot(items) {
                Ok(()) => {
                    info!(
                        "event=snapshot_save module=store status=ok store={} items={} duration_ms={}",
                        store.name(),
                        items.len(),
                        started_at.elapsed().as_millis()
                    );
                    return Ok(store.name().to_string());
                }
                Err(err) => {
                    error!(
                        "event=snapshot_save module=store status=error store={} error={}",
                        store.name(),
                        err
                    );
                    failures.push(format!("{}: {err}", store.name()));
                }
            }
        }

        Err(StoreError::AllStoresFailed(failures))
    }
}
