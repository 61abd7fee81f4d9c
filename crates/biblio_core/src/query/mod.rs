//! Query translation for catalog lookups.
//!
//! # Responsibility
//! - Parse compact human-typed query strings into field-scoped filters.
//! - Translate SQL-LIKE wildcard patterns (`%`, `_`) into regex matchers.
//!
//! # Invariants
//! - All filters are conjunctive; there is no OR in the grammar.
//! - Matching is case-insensitive everywhere.
//! - Blank values never match, not even `%`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod field;
pub mod filter;
pub mod pattern;

pub type QueryResult<T> = Result<T, QueryError>;

/// Query-layer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Translated pattern was rejected by the regex engine.
    InvalidPattern { pattern: String, message: String },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid wildcard pattern `{pattern}`: {message}")
            }
        }
    }
}

impl Error for QueryError {}
