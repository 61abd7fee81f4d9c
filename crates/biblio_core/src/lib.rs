//! Core domain logic for the Biblio catalog manager.
//! This crate owns item identity, query translation and snapshot persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod settings;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{
    BookDetails, ComicBookDetails, Item, ItemDetails, ItemId, ItemKind, PeriodicalDetails,
    UNASSIGNED_ID,
};
pub use query::field::QueryField;
pub use query::filter::{flatten_item, FieldFilter, ItemQuery};
pub use query::pattern::{translate_wildcard, WildcardPattern};
pub use query::{QueryError, QueryResult};
pub use repo::item_repo::{InMemoryItemRepository, ItemRepository, RepoError, RepoResult};
pub use service::catalog_service::{CatalogService, ServiceError, ServiceResult};
pub use settings::{
    Settings, SettingsError, SettingsResult, DEFAULT_DATA_FILE, SETTINGS_FILE_NAME,
};
pub use store::{
    JsonFileStore, LoadOutcome, SnapshotChain, SnapshotStore, SqliteDocumentStore, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
