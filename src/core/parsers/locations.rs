//! Key position scanner.
//!
//! Visits the shared walk and keeps only where each key token starts.

use std::collections::HashMap;

use super::walker::{KeyLine, LineValue, LineVisitor, walk};
use crate::core::KeyLocation;

/// Position of a key token within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPosition {
    /// Line number (0-indexed).
    pub line: usize,
    /// Column of the key token (0-indexed).
    pub col: usize,
    /// The key token as written.
    pub key_text: String,
}

impl KeyPosition {
    pub fn into_location(self, file_path: impl Into<String>) -> KeyLocation {
        KeyLocation::new(file_path, self.line, self.col, self.key_text)
    }
}

/// Find the position of every key in `text`, keyed by dotted path.
///
/// Runs independently of value parsing, so keys are locatable even in files
/// the value parsers cannot fully interpret. Later occurrences of a key
/// replace earlier ones.
pub fn locate_keys(text: &str) -> HashMap<String, KeyPosition> {
    let mut scanner = LocationScanner::default();
    walk(text, &mut scanner);
    scanner.positions
}

#[derive(Default)]
struct LocationScanner {
    positions: HashMap<String, KeyPosition>,
}

impl LineVisitor for LocationScanner {
    fn key(&mut self, key: &KeyLine<'_>, _value: LineValue<'_>) {
        self.positions.insert(
            key.path.to_string(),
            KeyPosition {
                line: key.line,
                col: key.col,
                key_text: key.raw_key.to_string(),
            },
        );
    }
}
