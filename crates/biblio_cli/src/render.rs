//! Plain-text rendering of catalog items.

use biblio_core::{BookDetails, Item, ItemDetails};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders one item as a header line plus indented variant details.
pub fn render_item(item: &Item) -> String {
    let mut lines = vec![format!(
        "#{} - {} ({} available) - {}",
        item.id, item.title, item.available_count, item.price
    )];

    match &item.details {
        ItemDetails::Book(book) => {
            lines.push(format!("  Type: book | Author: {}", book.author));
            lines.extend(book_lines(book));
        }
        ItemDetails::ComicBook(comic) => {
            lines.push(format!(
                "  Type: comic book | Author: {} | Illustrator: {}",
                comic.book.author, comic.illustrator
            ));
            lines.extend(book_lines(&comic.book));
        }
        ItemDetails::Periodical(periodical) => {
            let date = periodical
                .publication_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "  Type: periodical | Frequency: {} | Date: {}",
                periodical.frequency, date
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Optional book lines, skipped when the value is empty or absent.
fn book_lines(book: &BookDetails) -> Vec<String> {
    let mut lines = Vec::new();
    if !book.publisher.is_empty() {
        lines.push(format!("  Publisher: {}", book.publisher));
    }
    if !book.copies.is_empty() {
        lines.push(format!("  Copies: {}", book.copies.join(", ")));
    }
    if let Some(year) = book.year {
        lines.push(format!("  Year: {year}"));
    }
    lines
}

/// Renders a result list separated by blank lines, or a placeholder.
pub fn render_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> String {
    let rendered: Vec<String> = items.into_iter().map(render_item).collect();
    if rendered.is_empty() {
        return "No items found.\n".to_string();
    }
    rendered.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{render_item, render_items};
    use biblio_core::{BookDetails, ComicBookDetails, Item, PeriodicalDetails};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn book_lists_optional_details_only_when_present() {
        let item = Item::book(
            "Dune",
            3,
            Decimal::new(1999, 2),
            BookDetails {
                copies: vec!["D-1".to_string(), "D-2".to_string()],
                year: Some(1965),
                publisher: String::new(),
                author: "Herbert".to_string(),
            },
        )
        .with_id(1);

        assert_eq!(
            render_item(&item),
            "#1 - Dune (3 available) - 19.99\n  Type: book | Author: Herbert\n  Copies: D-1, D-2\n  Year: 1965\n"
        );
    }

    #[test]
    fn comic_book_shows_illustrator() {
        let item = Item::comic_book(
            "Tintin",
            1,
            Decimal::new(1250, 2),
            ComicBookDetails {
                book: BookDetails {
                    author: "Remi".to_string(),
                    publisher: "Casterman".to_string(),
                    ..BookDetails::default()
                },
                illustrator: "Herge".to_string(),
            },
        )
        .with_id(2);

        let rendered = render_item(&item);
        assert!(rendered.contains("Author: Remi | Illustrator: Herge"));
        assert!(rendered.contains("  Publisher: Casterman\n"));
        assert!(!rendered.contains("Year"));
    }

    #[test]
    fn periodical_shows_placeholder_for_missing_date() {
        let undated = Item::periodical(
            "Spirou",
            5,
            Decimal::new(300, 2),
            PeriodicalDetails {
                publication_date: None,
                frequency: "weekly".to_string(),
            },
        )
        .with_id(3);
        assert!(render_item(&undated).ends_with("Frequency: weekly | Date: -\n"));

        let dated = Item::periodical(
            "Spirou",
            5,
            Decimal::new(300, 2),
            PeriodicalDetails {
                publication_date: NaiveDate::from_ymd_opt(1954, 1, 7),
                frequency: "weekly".to_string(),
            },
        );
        assert!(render_item(&dated).contains("Date: 1954-01-07"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(render_items(Vec::<&Item>::new()), "No items found.\n");
    }

    #[test]
    fn list_separates_items_with_a_blank_line() {
        let first = Item::book("A", 1, Decimal::ONE, BookDetails::default()).with_id(1);
        let second = Item::book("B", 1, Decimal::ONE, BookDetails::default()).with_id(2);

        assert_eq!(
            render_items([&first, &second]),
            "#1 - A (1 available) - 1\n  Type: book | Author: \n\n#2 - B (1 available) - 1\n  Type: book | Author: \n"
        );
    }
}
