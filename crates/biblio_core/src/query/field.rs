//! Query field names and per-variant value extraction.
//!
//! # Invariants
//! - Field names are matched case-insensitively, French and English aliases.
//! - A field that does not exist on an item's variant yields no value, so a
//!   filter on it never matches that item.

use crate::model::item::{Item, ItemDetails};
use std::borrow::Cow;

/// Item attribute addressable from a `field:value` query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    Id,
    Title,
    AvailableCount,
    Price,
    Author,
    Year,
    Publisher,
    Copies,
    Illustrator,
    PublicationDate,
    Frequency,
}

const FIELD_ALIASES: &[(&str, QueryField)] = &[
    ("id", QueryField::Id),
    ("titre", QueryField::Title),
    ("title", QueryField::Title),
    ("dispo", QueryField::AvailableCount),
    ("disponibilite", QueryField::AvailableCount),
    ("disponibilité", QueryField::AvailableCount),
    ("available", QueryField::AvailableCount),
    ("prix", QueryField::Price),
    ("price", QueryField::Price),
    ("auteur", QueryField::Author),
    ("author", QueryField::Author),
    ("annee", QueryField::Year),
    ("année", QueryField::Year),
    ("year", QueryField::Year),
    ("maison", QueryField::Publisher),
    ("maisonedition", QueryField::Publisher),
    ("edition", QueryField::Publisher),
    ("publisher", QueryField::Publisher),
    ("exemplaires", QueryField::Copies),
    ("exemplaire", QueryField::Copies),
    ("copies", QueryField::Copies),
    ("dessinateur", QueryField::Illustrator),
    ("illustrator", QueryField::Illustrator),
    ("date", QueryField::PublicationDate),
    ("periodicite", QueryField::Frequency),
    ("périodicité", QueryField::Frequency),
    ("frequency", QueryField::Frequency),
];

/// Date layout used for `date:` filters and flattened item text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Comparable text pulled out of one item attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldText<'a> {
    /// Single scalar rendered as text.
    Text(Cow<'a, str>),
    /// Multi-valued attribute; a filter matches when any entry matches.
    List(&'a [String]),
}

impl QueryField {
    /// Resolves a query field name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        FIELD_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, field)| *field)
    }

    /// Every accepted alias for this field.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        FIELD_ALIASES
            .iter()
            .filter(move |(_, field)| *field == self)
            .map(|(alias, _)| *alias)
    }

    /// Extracts the value of this field from `item`.
    ///
    /// Returns `None` when the field is inapplicable to the item's variant or
    /// the optional value is absent (`year`, `date`).
    pub fn extract(self, item: &Item) -> Option<FieldText<'_>> {
        match self {
            Self::Id => Some(owned(item.id.to_string())),
            Self::Title => Some(borrowed(&item.title)),
            Self::AvailableCount => Some(owned(item.available_count.to_string())),
            Self::Price => Some(owned(item.price.to_string())),
            Self::Author => item.book_details().map(|book| borrowed(&book.author)),
            Self::Publisher => item.book_details().map(|book| borrowed(&book.publisher)),
            Self::Year => item
                .book_details()
                .and_then(|book| book.year)
                .map(|year| owned(year.to_string())),
            Self::Copies => item
                .book_details()
                .map(|book| FieldText::List(book.copies.as_slice())),
            Self::Illustrator => item.illustrator().map(borrowed),
            Self::PublicationDate => match &item.details {
                ItemDetails::Periodical(periodical) => periodical
                    .publication_date
                    .map(|date| owned(date.format(DATE_FORMAT).to_string())),
                _ => None,
            },
            Self::Frequency => item
                .periodical_details()
                .map(|periodical| borrowed(&periodical.frequency)),
        }
    }
}

fn borrowed(value: &str) -> FieldText<'_> {
    FieldText::Text(Cow::Borrowed(value))
}

fn owned<'a>(value: String) -> FieldText<'a> {
    FieldText::Text(Cow::Owned(value))
}
