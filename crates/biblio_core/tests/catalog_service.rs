use biblio_core::{
    BookDetails, CatalogService, Item, ItemKind, JsonFileStore, PeriodicalDetails, RepoError,
    ServiceError, Settings, SnapshotChain, SnapshotStore, SqliteDocumentStore, StoreError,
    StoreResult,
};
use rust_decimal::Decimal;
use std::path::Path;
use tempfile::TempDir;

struct OfflineStore;

impl SnapshotStore for OfflineStore {
    fn name(&self) -> &str {
        "offline"
    }

    fn load_snapshot(&self) -> StoreResult<Vec<Item>> {
        Err(StoreError::InvalidData("unreachable".to_string()))
    }

    fn save_snapshot(&self, _items: &[Item]) -> StoreResult<()> {
        Err(StoreError::InvalidData("unreachable".to_string()))
    }
}

fn json_chain(dir: &Path) -> SnapshotChain {
    SnapshotChain::new().with_store(JsonFileStore::new(dir.join("data.json")))
}

fn book(title: &str, author: &str) -> Item {
    Item::book(
        title,
        1,
        Decimal::new(1000, 2),
        BookDetails {
            author: author.to_string(),
            ..BookDetails::default()
        },
    )
}

#[test]
fn mutations_are_visible_after_reopen() {
    let dir = TempDir::new().unwrap();

    let mut service = CatalogService::open(json_chain(dir.path()));
    assert_eq!(service.loaded_from(), Some("json_file"));
    let dune = service.add_item(book("Dune", "Herbert")).unwrap();
    let hobbit = service.add_item(book("The Hobbit", "Tolkien")).unwrap();

    let mut edited = service.get_item(dune).unwrap().clone();
    edited.title = "Dune Messiah".to_string();
    service.update_item(edited).unwrap();
    service.remove_item(hobbit).unwrap();

    let reopened = CatalogService::open(json_chain(dir.path()));
    let titles: Vec<_> = reopened
        .list_items()
        .iter()
        .map(|item| item.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Dune Messiah"]);
}

#[test]
fn ids_continue_after_reload() {
    let dir = TempDir::new().unwrap();

    let mut service = CatalogService::open(json_chain(dir.path()));
    service.add_item(book("A", "x")).unwrap();
    service.add_item(book("B", "y")).unwrap();
    service.add_item(book("C", "z")).unwrap();
    service.remove_item(2).unwrap();

    let mut reopened = CatalogService::open(json_chain(dir.path()));
    assert_eq!(reopened.add_item(book("D", "w")).unwrap(), 4);
}

#[test]
fn failed_update_does_not_touch_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let mut service = CatalogService::open(json_chain(dir.path()));
    service.add_item(book("Dune", "Herbert")).unwrap();
    let saved = std::fs::read_to_string(&path).unwrap();

    let err = service
        .update_item(book("Ghost", "nobody").with_id(9))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::NotFound(9))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), saved);
}

#[test]
fn removing_unknown_id_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut service = CatalogService::open(json_chain(dir.path()));

    assert_eq!(service.remove_item(3).unwrap(), None);
    assert!(!dir.path().join("data.json").exists());
}

#[test]
fn unreachable_stores_yield_empty_catalog_and_save_errors() {
    let mut service = CatalogService::open(SnapshotChain::new().with_store(OfflineStore));
    assert_eq!(service.loaded_from(), None);
    assert!(service.list_items().is_empty());

    let err = service.add_item(book("Dune", "Herbert")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Persistence(StoreError::AllStoresFailed(_))
    ));
    // Why: a failed save must not roll back the in-memory mutation.
    assert_eq!(service.list_items().len(), 1);
}

#[test]
fn save_falls_back_past_an_offline_store() {
    let dir = TempDir::new().unwrap();
    let chain = SnapshotChain::new()
        .with_store(OfflineStore)
        .with_store(JsonFileStore::new(dir.path().join("data.json")));

    let mut service = CatalogService::empty(chain);
    service.add_item(book("Dune", "Herbert")).unwrap();

    assert_eq!(service.save_now().unwrap(), "json_file");
    let saved = JsonFileStore::new(dir.path().join("data.json"))
        .load_snapshot()
        .unwrap();
    assert_eq!(saved.len(), 1);
}

#[test]
fn empty_service_ignores_existing_snapshot() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = CatalogService::open(json_chain(dir.path()));
        service.add_item(book("Dune", "Herbert")).unwrap();
    }

    let service = CatalogService::empty(json_chain(dir.path()));
    assert!(service.list_items().is_empty());
    assert_eq!(service.loaded_from(), None);
}

#[test]
fn settings_chain_prefers_document_database() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        database_path: Some("catalog.sqlite3".to_string()),
        ..Settings::default()
    };

    let chain = SnapshotChain::from_settings(&settings, dir.path());
    assert_eq!(chain.store_names(), vec!["document_db", "json_file"]);

    let mut service = CatalogService::open(chain);
    service
        .add_item(Item::periodical(
            "Spirou",
            2,
            Decimal::new(250, 2),
            PeriodicalDetails::default(),
        ))
        .unwrap();

    let documents = SqliteDocumentStore::open(dir.path().join("catalog.sqlite3")).unwrap();
    assert_eq!(documents.load_snapshot().unwrap().len(), 1);
    assert!(!dir.path().join("data.json").exists());
}

#[test]
fn settings_chain_skips_unopenable_database() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("not-a-db")).unwrap();
    let settings = Settings {
        database_path: Some("not-a-db".to_string()),
        ..Settings::default()
    };

    let chain = SnapshotChain::from_settings(&settings, dir.path());
    assert_eq!(chain.store_names(), vec!["json_file"]);
}

#[test]
fn settings_chain_without_database_is_json_only() {
    let dir = TempDir::new().unwrap();
    let chain = SnapshotChain::from_settings(&Settings::default(), dir.path());

    assert_eq!(chain.store_names(), vec!["json_file"]);
}

#[test]
fn search_helpers_delegate_to_repository() {
    let dir = TempDir::new().unwrap();
    let mut service = CatalogService::open(json_chain(dir.path()));
    service.add_item(book("Dune", "Herbert")).unwrap();
    service
        .add_item(Item::periodical(
            "Spirou",
            2,
            Decimal::new(250, 2),
            PeriodicalDetails::default(),
        ))
        .unwrap();

    assert_eq!(service.search("auteur:herbert").unwrap().len(), 1);
    assert_eq!(service.items_of_kind(ItemKind::Periodical).len(), 1);
    assert!(service
        .search_kind(ItemKind::Periodical, "auteur:%")
        .unwrap()
        .is_empty());
}

#[test]
fn reopen_keeps_every_snapshot_item_through_the_next_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 0, "title": "No id", "available_count": 1, "price": "1", "kind": "book"},
            {"id": 1, "title": "Has id", "available_count": 1, "price": "1", "kind": "book"},
            {"id": 1, "title": "Repeated id", "available_count": 1, "price": "1", "kind": "book"}
        ]"#,
    )
    .unwrap();

    let mut service = CatalogService::open(json_chain(dir.path()));
    assert_eq!(service.list_items().len(), 3);
    service.save_now().unwrap();

    let saved = JsonFileStore::new(&path).load_snapshot().unwrap();
    let ids: Vec<_> = saved.iter().map(|item| (item.id, item.title.as_str())).collect();
    assert_eq!(ids, vec![(2, "No id"), (1, "Has id"), (3, "Repeated id")]);

    assert_eq!(service.add_item(book("Next", "x")).unwrap(), 4);
}
