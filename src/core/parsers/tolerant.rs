//! Line-oriented fallback flattener.
//!
//! Never fails: lines it does not understand are skipped. Used when the strict
//! parser rejects a file so that hand-edited, slightly broken language files
//! still contribute their keys.

use std::collections::{HashMap, HashSet};

use super::walker::{KeyLine, LineValue, LineVisitor, walk};
use crate::core::FlatTable;

/// Flatten `text` into dotted keys without requiring well-formed YAML.
pub fn flatten_tolerant(text: &str) -> FlatTable {
    let mut builder = TableBuilder::default();
    walk(text, &mut builder);
    builder.finish()
}

#[derive(Default)]
struct TableBuilder {
    table: FlatTable,
    /// Scalar sequence items collected per key.
    sequences: HashMap<String, Vec<String>>,
    /// Every key that opened a nested scope.
    scopes: Vec<String>,
}

impl LineVisitor for TableBuilder {
    fn key(&mut self, key: &KeyLine<'_>, value: LineValue<'_>) {
        self.sequences.remove(key.path);

        match value {
            LineValue::Scope => {
                self.table.remove(key.path);
                self.scopes.push(key.path.to_string());
            }
            LineValue::Block(value) | LineValue::Quoted(value) => {
                self.table.insert(key.path, value);
            }
            LineValue::Plain(value) => {
                self.table.insert(key.path, plain_scalar(value));
            }
        }
    }

    fn item(&mut self, parent: &str, value: &str) {
        let items = self.sequences.entry(parent.to_string()).or_default();
        items.push(plain_scalar(value).to_string());
        self.table.insert(parent, items.join(", "));
    }
}

impl TableBuilder {
    /// A scope that never received a child is a null value.
    fn finish(mut self) -> FlatTable {
        let parents: HashSet<&str> = self
            .table
            .keys()
            .flat_map(|key| key.match_indices('.').map(move |(pos, _)| &key[..pos]))
            .collect();

        let empty_scopes: Vec<String> = self
            .scopes
            .iter()
            .filter(|scope| !self.table.contains_key(scope) && !parents.contains(scope.as_str()))
            .cloned()
            .collect();

        for scope in empty_scopes {
            self.table.insert(scope, "");
        }
        self.table
    }
}

/// YAML null spellings flatten to the empty string.
fn plain_scalar(value: &str) -> &str {
    match value {
        "~" | "null" | "Null" | "NULL" => "",
        other => other,
    }
}
