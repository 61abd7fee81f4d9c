//! Compact query string parsing and item matching.
//!
//! # Grammar
//! - Tokens are whitespace-separated.
//! - `field:value` is a field filter (split at the first colon).
//! - Any other token is a global term matched against the flattened item.
//!
//! # Invariants
//! - Every token must match; repeated fields are ANDed, never ORed.
//! - An unknown field name is kept as a filter that never matches.
//! - A blank query matches every item.

use super::field::{FieldText, QueryField, DATE_FORMAT};
use super::pattern::WildcardPattern;
use super::QueryResult;
use crate::model::item::{BookDetails, Item, ItemDetails};
use log::debug;

const FIELD_SEPARATOR: char = ':';
const FLAT_VALUE_SEPARATOR: &str = " | ";

/// One `field:value` token.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    name: String,
    field: Option<QueryField>,
    pattern: WildcardPattern,
}

impl FieldFilter {
    /// Builds a filter for field `name`; unknown names never match.
    pub fn new(name: &str, value: &str) -> QueryResult<Self> {
        Ok(Self {
            name: name.to_string(),
            field: QueryField::parse(name),
            pattern: WildcardPattern::new(value)?,
        })
    }

    /// Field name as typed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved field, `None` when the name is not recognized.
    pub fn field(&self) -> Option<QueryField> {
        self.field
    }

    pub fn pattern(&self) -> &WildcardPattern {
        &self.pattern
    }

    pub fn matches(&self, item: &Item) -> bool {
        let Some(field) = self.field else {
            return false;
        };

        match field.extract(item) {
            Some(FieldText::Text(value)) => self.pattern.is_match(&value),
            Some(FieldText::List(values)) => {
                values.iter().any(|value| self.pattern.is_match(value))
            }
            None => false,
        }
    }
}

/// Parsed conjunctive item query.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    global_terms: Vec<WildcardPattern>,
    field_filters: Vec<FieldFilter>,
}

impl ItemQuery {
    /// Parses a compact query string. Blank input yields a match-all query.
    ///
    /// # Errors
    /// - Returns `InvalidPattern` if a token cannot be compiled.
    pub fn parse(text: &str) -> QueryResult<Self> {
        let mut query = Self::default();

        for token in text.split_whitespace() {
            match token.split_once(FIELD_SEPARATOR) {
                Some((name, value)) => query.field_filters.push(FieldFilter::new(name, value)?),
                None => query.global_terms.push(WildcardPattern::new(token)?),
            }
        }

        debug!(
            "event=query_parse module=query status=ok global_terms={} field_filters={} unknown_fields={}",
            query.global_terms.len(),
            query.field_filters.len(),
            query
                .field_filters
                .iter()
                .filter(|filter| filter.field.is_none())
                .count()
        );

        Ok(query)
    }

    /// Returns whether this query has no tokens (matches everything).
    pub fn is_empty(&self) -> bool {
        self.global_terms.is_empty() && self.field_filters.is_empty()
    }

    pub fn global_terms(&self) -> &[WildcardPattern] {
        &self.global_terms
    }

    pub fn field_filters(&self) -> &[FieldFilter] {
        &self.field_filters
    }

    /// Adds a field filter built outside the text syntax, e.g. a value
    /// containing whitespace.
    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.field_filters.push(filter);
        self
    }

    /// Returns whether `item` satisfies every token of this query.
    pub fn matches(&self, item: &Item) -> bool {
        if !self.field_filters.iter().all(|filter| filter.matches(item)) {
            return false;
        }

        if self.global_terms.is_empty() {
            return true;
        }

        let flattened = flatten_item(item);
        self.global_terms
            .iter()
            .all(|term| term.is_match(&flattened))
    }
}

/// Renders every attribute of the item's concrete variant into one line.
///
/// Used as the haystack for global terms. Values appear in field order and
/// are separated by ` | `; absent optional values are skipped.
pub fn flatten_item(item: &Item) -> String {
    let mut values = vec![
        item.id.to_string(),
        item.title.clone(),
        item.available_count.to_string(),
        item.price.to_string(),
    ];

    match &item.details {
        ItemDetails::Periodical(periodical) => {
            if let Some(date) = periodical.publication_date {
                values.push(date.format(DATE_FORMAT).to_string());
            }
            values.push(periodical.frequency.clone());
        }
        ItemDetails::Book(book) => push_book_values(&mut values, book),
        ItemDetails::ComicBook(comic) => {
            push_book_values(&mut values, &comic.book);
            values.push(comic.illustrator.clone());
        }
    }

    values.retain(|value| !value.is_empty());
    values.join(FLAT_VALUE_SEPARATOR)
}

fn push_book_values(values: &mut Vec<String>, book: &BookDetails) {
    values.push(book.copies.join(", "));
    if let Some(year) = book.year {
        values.push(year.to_string());
    }
    values.push(book.publisher.clone());
    values.push(book.author.clone());
}
