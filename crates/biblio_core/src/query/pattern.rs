//! SQL-LIKE wildcard translation.
//!
//! `%` matches any run of characters (possibly empty), `_` matches exactly
//! one character, every other character is literal. A pattern without
//! wildcards is a substring search.

use super::{QueryError, QueryResult};
use regex::{Regex, RegexBuilder};

const ANY_SEQUENCE: char = '%';
const ANY_CHAR: char = '_';

/// Compiled, case-insensitive wildcard matcher.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    raw: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compiles `raw` into an anchored, case-insensitive matcher.
    ///
    /// # Errors
    /// - Returns `InvalidPattern` when the regex engine rejects the
    ///   translated expression (size limits only; every literal is escaped).
    pub fn new(raw: &str) -> QueryResult<Self> {
        let source = translate_wildcard(raw);
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|err| QueryError::InvalidPattern {
                pattern: raw.to_string(),
                message: err.to_string(),
            })?;

        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// Original pattern text as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tests one field value. Blank values never match.
    pub fn is_match(&self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        self.regex.is_match(value)
    }
}

/// Returns whether `raw` uses `%` or `_`.
pub fn has_wildcards(raw: &str) -> bool {
    raw.contains([ANY_SEQUENCE, ANY_CHAR])
}

/// Translates a wildcard pattern to an anchored regex source.
///
/// Patterns without wildcards are wrapped as `%raw%`.
pub fn translate_wildcard(raw: &str) -> String {
    let wrapped;
    let pattern = if has_wildcards(raw) {
        raw
    } else {
        wrapped = format!("{ANY_SEQUENCE}{raw}{ANY_SEQUENCE}");
        wrapped.as_str()
    };

    let mut source = String::with_capacity(pattern.len() * 2 + 2);
    source.push('^');
    let mut literal = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            ANY_SEQUENCE => source.push_str(".*"),
            ANY_CHAR => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut literal))),
        }
    }
    source.push('$');
    source
}
