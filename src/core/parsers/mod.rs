//! Language file parsers.
//!
//! - `strict`: YAML parser backed flattener, rejects malformed input
//! - `tolerant`: line-oriented flattener that never fails
//! - `locations`: key position scanner, independent of value parsing
//!
//! The tolerant flattener and the location scanner share one indentation
//! walker (`walker`) so both agree on which lines are keys.

pub mod locations;
pub mod strict;
pub mod tolerant;
pub(crate) mod walker;

pub use locations::{KeyPosition, locate_keys};
pub use strict::{ParseError, flatten_strict};
pub use tolerant::flatten_tolerant;

use crate::core::FlatTable;

/// Which flattener produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Strict,
    Tolerant,
}

/// Result of [`flatten`].
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub table: FlatTable,
    pub mode: ParseMode,
    /// Why the strict parser rejected the input, when it did.
    pub fallback_reason: Option<String>,
}

/// Flatten a language file, trying the strict parser first.
pub fn flatten(text: &str) -> Flattened {
    match flatten_strict(text) {
        Ok(table) => Flattened {
            table,
            mode: ParseMode::Strict,
            fallback_reason: None,
        },
        Err(err) => Flattened {
            table: flatten_tolerant(text),
            mode: ParseMode::Tolerant,
            fallback_reason: Some(err.to_string()),
        },
    }
}
