//! Parsers for values typed at the menu prompts.
//!
//! # Invariants
//! - Input is trimmed before parsing.
//! - Optional fields treat blank input as absent, never as an error.

use biblio_core::{ItemId, ItemKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted date layouts, ISO first.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// A prompt value that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Required(&'static str),
    InvalidNumber(String),
    InvalidPrice(String),
    InvalidDate(String),
    UnknownKind(String),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::InvalidNumber(value) => write!(f, "`{value}` is not a whole number"),
            Self::InvalidPrice(value) => write!(f, "`{value}` is not a price (e.g. 12.50)"),
            Self::InvalidDate(value) => {
                write!(f, "`{value}` is not a date (yyyy-mm-dd or dd/mm/yyyy)")
            }
            Self::UnknownKind(value) => write!(
                f,
                "unknown item type `{value}`; expected book, comic_book or periodical"
            ),
        }
    }
}

impl Error for InputError {}

pub type InputResult<T> = Result<T, InputError>;

pub fn parse_title(input: &str) -> InputResult<String> {
    let title = input.trim();
    if title.is_empty() {
        return Err(InputError::Required("title"));
    }
    Ok(title.to_string())
}

pub fn parse_text(input: &str) -> InputResult<String> {
    Ok(input.trim().to_string())
}

pub fn parse_count(input: &str) -> InputResult<u32> {
    let value = input.trim();
    value
        .parse()
        .map_err(|_| InputError::InvalidNumber(value.to_string()))
}

pub fn parse_id(input: &str) -> InputResult<ItemId> {
    let value = input.trim().trim_start_matches('#');
    value
        .parse()
        .map_err(|_| InputError::InvalidNumber(value.to_string()))
}

/// Parses a price written with either `.` or `,` as decimal separator.
pub fn parse_price(input: &str) -> InputResult<Decimal> {
    let value = input.trim();
    if value.is_empty() {
        return Err(InputError::Required("price"));
    }
    value
        .replace(',', ".")
        .parse()
        .map_err(|_| InputError::InvalidPrice(value.to_string()))
}

pub fn parse_optional_year(input: &str) -> InputResult<Option<i32>> {
    let value = input.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| InputError::InvalidNumber(value.to_string()))
}

pub fn parse_optional_date(input: &str) -> InputResult<Option<NaiveDate>> {
    let value = input.trim();
    if value.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .map(Some)
        .ok_or_else(|| InputError::InvalidDate(value.to_string()))
}

/// Splits a comma-separated copy list, dropping blank entries.
pub fn parse_copies(input: &str) -> InputResult<Vec<String>> {
    Ok(input
        .split(',')
        .map(str::trim)
        .filter(|copy| !copy.is_empty())
        .map(str::to_string)
        .collect())
}

/// Accepts a kind name, alias or its 1-based menu number.
pub fn parse_kind(input: &str) -> InputResult<ItemKind> {
    let value = input.trim();
    if let Ok(index) = value.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|index| ItemKind::ALL.get(index).copied())
            .ok_or_else(|| InputError::UnknownKind(value.to_string()));
    }
    ItemKind::parse(value).ok_or_else(|| InputError::UnknownKind(value.to_string()))
}

pub fn parse_yes_no(input: &str) -> InputResult<bool> {
    Ok(matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    ))
}
