//! Item repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide identity assignment, CRUD and filtered lookups over items.
//! - Keep collection order stable (insertion order).
//!
//! # Invariants
//! - `add` assigns `max(existing ids, 0) + 1` when the item id is `<= 0`.
//! - `add` rejects a caller-supplied id that is already taken.
//! - `update` replaces in place and never changes an item's id.
//! - `remove_by_id` on an unknown id is a no-op.
//! - Snapshot import never drops an item; id conflicts are resolved by
//!   issuing fresh ids.

use crate::model::item::{Item, ItemId, ItemKind};
use crate::query::filter::ItemQuery;
use crate::query::QueryError;
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for state-changing requests and query translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// `update` targeted an id absent from the collection.
    NotFound(ItemId),
    /// `add` received a caller-supplied id already in use.
    DuplicateId(ItemId),
    Query(QueryError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::DuplicateId(id) => write!(f, "item id already in use: {id}"),
            Self::Query(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<QueryError> for RepoError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

/// Repository interface for catalog items.
///
/// Implementors supply storage primitives; filtered reads are derived from
/// [`ItemRepository::get_all`].
pub trait ItemRepository {
    /// Adds an item and returns its (possibly newly assigned) id.
    fn add(&mut self, item: Item) -> RepoResult<ItemId>;
    /// Removes the item with `id`, returning it when present.
    fn remove_by_id(&mut self, id: ItemId) -> Option<Item>;
    /// Replaces the stored item that has `item.id`.
    fn update(&mut self, item: Item) -> RepoResult<()>;
    fn get_by_id(&self, id: ItemId) -> Option<&Item>;
    /// All items in insertion order.
    fn get_all(&self) -> &[Item];

    /// Removes the stored item that has the same id as `item`.
    fn remove(&mut self, item: &Item) -> Option<Item> {
        self.remove_by_id(item.id)
    }

    fn len(&self) -> usize {
        self.get_all().len()
    }

    fn is_empty(&self) -> bool {
        self.get_all().is_empty()
    }

    /// Items whose variant is `kind`, in collection order.
    fn get_by_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.get_all()
            .iter()
            .filter(|item| item.kind() == kind)
            .collect()
    }

    /// Items matching an already parsed query.
    fn find(&self, query: &ItemQuery) -> Vec<&Item> {
        self.get_all()
            .iter()
            .filter(|item| query.matches(item))
            .collect()
    }

    /// Items matching every token of `query`. Blank input returns all items.
    fn get_by_query(&self, query: &str) -> RepoResult<Vec<&Item>> {
        let parsed = ItemQuery::parse(query)?;
        Ok(self.find(&parsed))
    }

    /// Items of variant `kind` matching every token of `query`.
    fn get_by_kind_and_query(&self, kind: ItemKind, query: &str) -> RepoResult<Vec<&Item>> {
        let parsed = ItemQuery::parse(query)?;
        Ok(self
            .get_all()
            .iter()
            .filter(|item| item.kind() == kind && parsed.matches(item))
            .collect())
    }

    /// Owned copy of the whole collection for persistence.
    fn snapshot(&self) -> Vec<Item> {
        self.get_all().to_vec()
    }
}

/// Vec-backed item repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Vec<Item>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from a loaded snapshot, keeping every item.
    ///
    /// Items keep their snapshot order. The first item holding a positive id
    /// keeps it; unassigned items and later repeats of an id receive fresh
    /// ids above the snapshot's highest id, in order.
    pub fn from_snapshot(items: Vec<Item>) -> Self {
        let total = items.len();
        let mut next_id = items
            .iter()
            .map(|item| item.id)
            .max()
            .unwrap_or(0)
            .max(0)
            + 1;
        let mut seen = HashSet::with_capacity(total);
        let mut assigned = 0usize;
        let mut reassigned = 0usize;
        let mut imported = Vec::with_capacity(total);

        for mut item in items {
            if item.has_assigned_id() {
                if seen.insert(item.id) {
                    imported.push(item);
                    continue;
                }
                warn!(
                    "event=snapshot_import module=repo status=reassigned old_id={} new_id={}",
                    item.id, next_id
                );
                reassigned += 1;
            } else {
                assigned += 1;
            }

            item.id = next_id;
            seen.insert(next_id);
            next_id += 1;
            imported.push(item);
        }

        debug!(
            "event=snapshot_import module=repo status=ok total={} assigned={} reassigned={}",
            total, assigned, reassigned
        );
        Self { items: imported }
    }

    /// Id the next unassigned item will receive.
    pub fn next_id(&self) -> ItemId {
        self.items.iter().map(|item| item.id).max().unwrap_or(0).max(0) + 1
    }

    fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl ItemRepository for InMemoryItemRepository {
    fn add(&mut self, mut item: Item) -> RepoResult<ItemId> {
        if item.has_assigned_id() {
            if self.position_of(item.id).is_some() {
                return Err(RepoError::DuplicateId(item.id));
            }
        } else {
            item.id = self.next_id();
        }

        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    fn remove_by_id(&mut self, id: ItemId) -> Option<Item> {
        let position = self.position_of(id)?;
        Some(self.items.remove(position))
    }

    fn update(&mut self, item: Item) -> RepoResult<()> {
        let position = self
            .position_of(item.id)
            .filter(|_| item.has_assigned_id())
            .ok_or(RepoError::NotFound(item.id))?;
        self.items[position] = item;
        Ok(())
    }

    fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_all(&self) -> &[Item] {
        &self.items
    }
}
