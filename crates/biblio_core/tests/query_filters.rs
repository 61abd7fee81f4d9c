use biblio_core::{
    BookDetails, ComicBookDetails, InMemoryItemRepository, Item, ItemRepository,
    PeriodicalDetails,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn seeded_repo() -> InMemoryItemRepository {
    let mut repo = InMemoryItemRepository::new();
    repo.add(Item::book(
        "The Fellowship of the Ring",
        2,
        Decimal::new(2499, 2),
        BookDetails {
            copies: vec!["LOTR-A".to_string(), "LOTR-B".to_string()],
            year: Some(1954),
            publisher: "Allen & Unwin".to_string(),
            author: "J.R.R. Tolkien".to_string(),
        },
    ))
    .unwrap();
    repo.add(Item::book(
        "The Hobbit",
        1,
        Decimal::new(1500, 2),
        BookDetails {
            year: Some(1937),
            author: "J.R.R. Tolkien".to_string(),
            ..BookDetails::default()
        },
    ))
    .unwrap();
    repo.add(Item::comic_book(
        "Tintin au Tibet",
        4,
        Decimal::new(1295, 2),
        ComicBookDetails {
            book: BookDetails {
                year: Some(1960),
                publisher: "Casterman".to_string(),
                author: "Hergé".to_string(),
                ..BookDetails::default()
            },
            illustrator: "Hergé".to_string(),
        },
    ))
    .unwrap();
    repo.add(Item::periodical(
        "Spirou 1954",
        6,
        Decimal::new(250, 2),
        PeriodicalDetails {
            publication_date: NaiveDate::from_ymd_opt(1954, 6, 3),
            frequency: "Hebdomadaire".to_string(),
        },
    ))
    .unwrap();
    repo.add(Item::book(
        "Harry Potter",
        3,
        Decimal::new(999, 2),
        BookDetails {
            author: "Rowling".to_string(),
            ..BookDetails::default()
        },
    ))
    .unwrap();
    repo.add(Item::book("Horry", 1, Decimal::ONE, BookDetails::default()))
        .unwrap();
    repo.add(Item::book("Harrry", 1, Decimal::ONE, BookDetails::default()))
        .unwrap();
    repo
}

fn titles(repo: &InMemoryItemRepository, query: &str) -> Vec<String> {
    repo.get_by_query(query)
        .unwrap()
        .into_iter()
        .map(|item| item.title.clone())
        .collect()
}

#[test]
fn percent_wildcards_match_contained_title() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "titre:%harry%"), vec!["Harry Potter"]);
}

#[test]
fn underscore_matches_exactly_one_character() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "titre:h_rry"), vec!["Horry"]);
}

#[test]
fn author_and_year_are_conjunctive_and_skip_periodicals() {
    let repo = seeded_repo();
    assert_eq!(
        titles(&repo, "auteur:tolkien annee:1954"),
        vec!["The Fellowship of the Ring"]
    );
}

#[test]
fn global_term_matches_across_fields_case_insensitively() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "TINTIN"), vec!["Tintin au Tibet"]);
    assert_eq!(
        titles(&repo, "1954"),
        vec!["The Fellowship of the Ring", "Spirou 1954"]
    );
}

#[test]
fn global_terms_combine_with_field_filters() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "tolkien annee:1937"), vec!["The Hobbit"]);
}

#[test]
fn english_field_aliases_match_like_french_ones() {
    let repo = seeded_repo();
    assert_eq!(
        titles(&repo, "author:tolkien year:1954"),
        titles(&repo, "auteur:tolkien annee:1954")
    );
    assert_eq!(titles(&repo, "ILLUSTRATOR:herg_"), vec!["Tintin au Tibet"]);
}

#[test]
fn copies_match_when_any_label_matches() {
    let repo = seeded_repo();
    assert_eq!(
        titles(&repo, "exemplaires:lotr-b"),
        vec!["The Fellowship of the Ring"]
    );
}

#[test]
fn periodical_filters_use_formatted_values() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "date:1954-06-03"), vec!["Spirou 1954"]);
    assert_eq!(titles(&repo, "périodicité:hebdo%"), vec!["Spirou 1954"]);
}

#[test]
fn numeric_fields_match_their_decimal_text() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "prix:12.95"), vec!["Tintin au Tibet"]);
    assert_eq!(titles(&repo, "dispo:6"), vec!["Spirou 1954"]);
    assert_eq!(titles(&repo, "id:2"), vec!["The Hobbit"]);
}

#[test]
fn unknown_field_matches_nothing() {
    let repo = seeded_repo();
    assert!(titles(&repo, "isbn:%").is_empty());
}

#[test]
fn blank_publisher_never_matches_percent() {
    let repo = seeded_repo();
    assert_eq!(
        titles(&repo, "maison:%"),
        vec!["The Fellowship of the Ring", "Tintin au Tibet"]
    );
}

#[test]
fn missing_year_never_matches() {
    let repo = seeded_repo();
    let matches = titles(&repo, "annee:%");
    assert!(!matches.contains(&"Harry Potter".to_string()));
}

#[test]
fn regex_metacharacters_in_values_are_literal() {
    let repo = seeded_repo();
    assert_eq!(titles(&repo, "maison:allen_&_unwin"), vec!["The Fellowship of the Ring"]);
    assert!(titles(&repo, "titre:.*").is_empty());
}
