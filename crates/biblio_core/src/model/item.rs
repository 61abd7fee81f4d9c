//! Catalog item records.
//!
//! # Responsibility
//! - Define the base item fields shared by every catalog entry.
//! - Carry the variant payload (periodical, book, comic book) as a tagged enum.
//!
//! # Invariants
//! - `id <= 0` means "not assigned yet"; the repository issues real ids.
//! - A comic book is a book plus an illustrator; book fields are shared.
//! - `copies` keeps insertion order and defaults to empty.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Repository-issued item identifier.
pub type ItemId = i64;

/// Id value carried by items that have not been added yet.
pub const UNASSIGNED_ID: ItemId = 0;

/// Closed set of catalog item variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Periodical,
    Book,
    ComicBook,
}

impl ItemKind {
    /// Every variant in display order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Book, ItemKind::ComicBook, ItemKind::Periodical];

    /// Stable wire name, also used as the document store discriminator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Periodical => "periodical",
            Self::Book => "book",
            Self::ComicBook => "comic_book",
        }
    }

    /// Parses a wire name or a common alias (`livre`, `bd`, `periodique`...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "periodical" | "periodique" | "périodique" => Some(Self::Periodical),
            "book" | "livre" => Some(Self::Book),
            "comic_book" | "comicbook" | "comic" | "bd" | "bande_dessinee" | "bande-dessinee" => {
                Some(Self::ComicBook)
            }
            _ => None,
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Periodical-specific fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicalDetails {
    /// Issue date, serialized as `yyyy-MM-dd`.
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    /// Free-form publication rhythm (`weekly`, `mensuel`...).
    #[serde(default)]
    pub frequency: String,
}

/// Book-specific fields, shared by comic books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    /// Copy labels in insertion order.
    #[serde(default)]
    pub copies: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub author: String,
}

/// Comic book fields: a book plus its illustrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicBookDetails {
    #[serde(flatten)]
    pub book: BookDetails,
    #[serde(default)]
    pub illustrator: String,
}

/// Variant payload of an [`Item`], tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetails {
    Periodical(PeriodicalDetails),
    Book(BookDetails),
    ComicBook(ComicBookDetails),
}

impl ItemDetails {
    /// Returns the variant tag of this payload.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Periodical(_) => ItemKind::Periodical,
            Self::Book(_) => ItemKind::Book,
            Self::ComicBook(_) => ItemKind::ComicBook,
        }
    }

    /// Returns an empty payload for `kind`.
    pub fn empty(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Periodical => Self::Periodical(PeriodicalDetails::default()),
            ItemKind::Book => Self::Book(BookDetails::default()),
            ItemKind::ComicBook => Self::ComicBook(ComicBookDetails::default()),
        }
    }
}

/// Catalog entry: base fields plus one variant payload.
///
/// Numeric fields are trusted as given: `price` may be negative, and no
/// upper bound is enforced on `available_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Repository-issued id; `<= 0` until the item is added.
    pub id: ItemId,
    pub title: String,
    /// Number of copies available for lending.
    pub available_count: u32,
    /// Unit price, serialized as a decimal string.
    pub price: Decimal,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl Item {
    /// Creates an item with an unassigned id.
    pub fn new(
        title: impl Into<String>,
        available_count: u32,
        price: Decimal,
        details: ItemDetails,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            title: title.into(),
            available_count,
            price,
            details,
        }
    }

    /// Creates a book with an unassigned id.
    pub fn book(
        title: impl Into<String>,
        available_count: u32,
        price: Decimal,
        details: BookDetails,
    ) -> Self {
        Self::new(title, available_count, price, ItemDetails::Book(details))
    }

    /// Creates a comic book with an unassigned id.
    pub fn comic_book(
        title: impl Into<String>,
        available_count: u32,
        price: Decimal,
        details: ComicBookDetails,
    ) -> Self {
        Self::new(title, available_count, price, ItemDetails::ComicBook(details))
    }

    /// Creates a periodical with an unassigned id.
    pub fn periodical(
        title: impl Into<String>,
        available_count: u32,
        price: Decimal,
        details: PeriodicalDetails,
    ) -> Self {
        Self::new(title, available_count, price, ItemDetails::Periodical(details))
    }

    /// Returns this item with `id` set. Used by load and import paths.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    /// Returns whether the repository has issued an id for this item.
    pub fn has_assigned_id(&self) -> bool {
        self.id > 0
    }

    /// Book fields for books and comic books, `None` for periodicals.
    pub fn book_details(&self) -> Option<&BookDetails> {
        match &self.details {
            ItemDetails::Book(book) => Some(book),
            ItemDetails::ComicBook(comic) => Some(&comic.book),
            ItemDetails::Periodical(_) => None,
        }
    }

    pub fn periodical_details(&self) -> Option<&PeriodicalDetails> {
        match &self.details {
            ItemDetails::Periodical(periodical) => Some(periodical),
            _ => None,
        }
    }

    /// Illustrator of a comic book; `None` for every other variant.
    pub fn illustrator(&self) -> Option<&str> {
        match &self.details {
            ItemDetails::ComicBook(comic) => Some(comic.illustrator.as_str()),
            _ => None,
        }
    }
}
