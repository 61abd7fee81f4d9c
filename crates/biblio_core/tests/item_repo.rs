use biblio_core::{
    BookDetails, ComicBookDetails, InMemoryItemRepository, Item, ItemKind, ItemQuery,
    ItemRepository, PeriodicalDetails, RepoError,
};
use rust_decimal::Decimal;

fn dune() -> Item {
    Item::book(
        "Dune",
        3,
        Decimal::new(1999, 2),
        BookDetails {
            author: "Herbert".to_string(),
            year: Some(1965),
            ..BookDetails::default()
        },
    )
}

fn tintin() -> Item {
    Item::comic_book(
        "Tintin",
        1,
        Decimal::new(1250, 2),
        ComicBookDetails {
            book: BookDetails {
                author: "Remi".to_string(),
                ..BookDetails::default()
            },
            illustrator: "Herge".to_string(),
        },
    )
}

fn spirou() -> Item {
    Item::periodical(
        "Spirou",
        5,
        Decimal::new(300, 2),
        PeriodicalDetails {
            publication_date: None,
            frequency: "weekly".to_string(),
        },
    )
}

fn ids(items: &[&Item]) -> Vec<i64> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn first_add_assigns_id_one() {
    let mut repo = InMemoryItemRepository::new();
    assert_eq!(repo.add(dune()).unwrap(), 1);
    assert_eq!(repo.get_by_id(1).unwrap().title, "Dune");
}

#[test]
fn dune_and_tintin_scenario() {
    let mut repo = InMemoryItemRepository::new();

    assert_eq!(repo.add(dune()).unwrap(), 1);
    assert_eq!(repo.add(tintin()).unwrap(), 2);

    let by_illustrator = repo.get_by_query("dessinateur:herge").unwrap();
    assert_eq!(ids(&by_illustrator), vec![2]);

    let by_id = repo.get_by_query("id:1").unwrap();
    assert_eq!(ids(&by_id), vec![1]);

    repo.remove_by_id(1);
    let remaining = repo.get_all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Tintin");
}

#[test]
fn get_by_id_returns_unique_item_or_none() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    repo.add(tintin()).unwrap();
    repo.add(spirou()).unwrap();

    for item in repo.get_all() {
        let found = repo.get_by_id(item.id).unwrap();
        assert_eq!(found, item);
    }
    assert!(repo.get_by_id(99).is_none());
}

#[test]
fn remove_by_id_shrinks_by_one_or_is_noop() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    repo.add(tintin()).unwrap();

    assert!(repo.remove_by_id(42).is_none());
    assert_eq!(repo.len(), 2);

    assert!(repo.remove_by_id(1).is_some());
    assert_eq!(repo.len(), 1);
    assert!(repo.get_by_id(1).is_none());
}

#[test]
fn ids_are_not_reused_while_a_higher_id_exists() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    repo.add(tintin()).unwrap();
    repo.add(spirou()).unwrap();

    repo.remove_by_id(2);
    assert_eq!(repo.add(dune()).unwrap(), 4);
}

#[test]
fn update_replaces_in_place() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    repo.add(tintin()).unwrap();
    repo.add(spirou()).unwrap();

    let mut edited = repo.get_by_id(2).unwrap().clone();
    edited.title = "Tintin au Tibet".to_string();
    edited.available_count = 0;
    repo.update(edited).unwrap();

    let titles: Vec<_> = repo.get_all().iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Tintin au Tibet", "Spirou"]);
    assert_eq!(repo.get_by_id(2).unwrap().available_count, 0);
}

#[test]
fn update_unknown_id_fails_and_leaves_collection_untouched() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    let before = repo.snapshot();

    let err = repo.update(tintin().with_id(7)).unwrap_err();
    assert_eq!(err, RepoError::NotFound(7));
    assert_eq!(repo.snapshot(), before);
}

#[test]
fn empty_query_equals_get_all() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    repo.add(tintin()).unwrap();
    repo.add(spirou()).unwrap();

    let all: Vec<&Item> = repo.get_all().iter().collect();
    assert_eq!(repo.get_by_query("").unwrap(), all);
    assert_eq!(repo.get_by_query("   ").unwrap(), all);
    assert_eq!(repo.find(&ItemQuery::default()), all);
}

#[test]
fn get_by_kind_preserves_collection_order() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(tintin()).unwrap();
    repo.add(dune()).unwrap();
    repo.add(spirou()).unwrap();
    repo.add(tintin()).unwrap();

    assert_eq!(ids(&repo.get_by_kind(ItemKind::ComicBook)), vec![1, 4]);
    assert_eq!(ids(&repo.get_by_kind(ItemKind::Book)), vec![2]);
    assert_eq!(ids(&repo.get_by_kind(ItemKind::Periodical)), vec![3]);
}

#[test]
fn comic_books_are_not_plain_books_for_kind_lookups() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(tintin()).unwrap();

    assert!(repo.get_by_kind(ItemKind::Book).is_empty());
}

#[test]
fn kind_and_query_is_the_intersection() {
    let mut repo = InMemoryItemRepository::new();
    repo.add(dune()).unwrap();
    repo.add(tintin()).unwrap();
    repo.add(spirou()).unwrap();

    let books_by_remi = repo
        .get_by_kind_and_query(ItemKind::Book, "auteur:remi")
        .unwrap();
    assert!(books_by_remi.is_empty());

    let comics_by_remi = repo
        .get_by_kind_and_query(ItemKind::ComicBook, "auteur:remi")
        .unwrap();
    assert_eq!(ids(&comics_by_remi), vec![2]);

    let all_periodicals = repo
        .get_by_kind_and_query(ItemKind::Periodical, "")
        .unwrap();
    assert_eq!(ids(&all_periodicals), vec![3]);
}
