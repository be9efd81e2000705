use std::collections::{HashMap, hash_map};

use serde::Serialize;

use super::LanguageCode;

/// Position of a key token in a language file.
///
/// Points at the key itself (not its value) so that navigation can select it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLocation {
    /// Source identifier of the owning file (e.g., "./bot/lang/en.yml").
    pub file_path: String,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column of the first character of the key token (0-indexed).
    pub col: usize,
    /// The key token as written, which may differ from the last dotted segment
    /// (e.g., it keeps surrounding quotes).
    pub key_text: String,
}

impl KeyLocation {
    pub fn new(
        file_path: impl Into<String>,
        line: usize,
        col: usize,
        key_text: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
            key_text: key_text.into(),
        }
    }

    /// Column just past the key token, for selecting the whole key.
    pub fn end_col(&self) -> usize {
        self.col + self.key_text.chars().count()
    }
}

/// Key locations of a single language, keyed by dotted key.
pub type LocationMap = HashMap<String, KeyLocation>;

/// Flat mapping from dotted key to scalar value.
///
/// The empty string is never stored as a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    entries: HashMap<String, String>,
}

impl FlatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key.
    ///
    /// Empty keys are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another table into this one; entries of `other` win.
    pub fn merge(&mut self, other: FlatTable) {
        self.entries.extend(other.entries);
    }
}

impl IntoIterator for FlatTable {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatTable {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = FlatTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// A translation picked by the resolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTranslation {
    /// The dotted key that was looked up.
    pub key: String,
    pub value: String,
    /// Language the value came from.
    pub language: LanguageCode,
    /// True only when the value came from the configured default language.
    pub from_default: bool,
}
