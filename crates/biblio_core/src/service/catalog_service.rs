//! Catalog use-case service.
//!
//! # Responsibility
//! - Load the catalog once at startup through the store chain.
//! - Snapshot-save after every successful mutation.
//! - Expose repository reads unchanged.
//!
//! # Invariants
//! - A failed mutation never triggers a save.
//! - A failed save is returned to the caller; the in-memory change stays.
//! - Stores only ever receive an owned copy of the collection.

use crate::model::item::{Item, ItemId, ItemKind};
use crate::query::filter::ItemQuery;
use crate::repo::item_repo::{InMemoryItemRepository, ItemRepository, RepoError, RepoResult};
use crate::store::{SnapshotChain, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Catalog service failure.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    /// The mutation was applied in memory but no store accepted the snapshot.
    Persistence(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "snapshot save failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

/// Repository plus persistence chain, driven by one caller.
pub struct CatalogService<R: ItemRepository> {
    repo: R,
    stores: SnapshotChain,
    loaded_from: Option<String>,
}

impl CatalogService<InMemoryItemRepository> {
    /// Loads the catalog through `stores`, falling back to empty.
    pub fn open(stores: SnapshotChain) -> Self {
        let outcome = stores.load();
        let repo = InMemoryItemRepository::from_snapshot(outcome.items);
        info!(
            "event=catalog_open module=service status=ok source={} items={}",
            outcome.source.as_deref().unwrap_or("none"),
            repo.len()
        );
        Self {
            repo,
            stores,
            loaded_from: outcome.source,
        }
    }

    /// Starts with an empty catalog without reading any store.
    pub fn empty(stores: SnapshotChain) -> Self {
        Self::new(InMemoryItemRepository::new(), stores)
    }
}

impl<R: ItemRepository> CatalogService<R> {
    /// Creates a service over an already populated repository.
    pub fn new(repo: R, stores: SnapshotChain) -> Self {
        Self {
            repo,
            stores,
            loaded_from: None,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Store that satisfied the startup load, if any.
    pub fn loaded_from(&self) -> Option<&str> {
        self.loaded_from.as_deref()
    }

    /// Store names in fallback order.
    pub fn store_names(&self) -> Vec<&str> {
        self.stores.store_names()
    }

    /// Adds an item, then saves. Returns the item id.
    pub fn add_item(&mut self, item: Item) -> ServiceResult<ItemId> {
        let id = self.repo.add(item)?;
        info!("event=item_add module=service status=ok id={id}");
        self.persist()?;
        Ok(id)
    }

    /// Replaces the item with the same id, then saves.
    pub fn update_item(&mut self, item: Item) -> ServiceResult<()> {
        let id = item.id;
        self.repo.update(item)?;
        info!("event=item_update module=service status=ok id={id}");
        self.persist()?;
        Ok(())
    }

    /// Removes an item by id. Saves only when something was removed.
    pub fn remove_item(&mut self, id: ItemId) -> ServiceResult<Option<Item>> {
        let removed = self.repo.remove_by_id(id);
        if removed.is_some() {
            info!("event=item_remove module=service status=ok id={id}");
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.repo.get_by_id(id)
    }

    pub fn list_items(&self) -> &[Item] {
        self.repo.get_all()
    }

    pub fn items_of_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.repo.get_by_kind(kind)
    }

    pub fn search(&self, query: &str) -> RepoResult<Vec<&Item>> {
        self.repo.get_by_query(query)
    }

    pub fn find(&self, query: &ItemQuery) -> Vec<&Item> {
        self.repo.find(query)
    }

    pub fn search_kind(&self, kind: ItemKind, query: &str) -> RepoResult<Vec<&Item>> {
        self.repo.get_by_kind_and_query(kind, query)
    }

    /// Saves the current collection. Returns the store that accepted it.
    pub fn save_now(&self) -> ServiceResult<String> {
        self.persist()
    }

    fn persist(&self) -> ServiceResult<String> {
        let snapshot = self.repo.snapshot();
        Ok(self.stores.save(&snapshot)?)
    }
}
