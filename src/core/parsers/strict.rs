//! Strict flattener backed by a real YAML parser.

use serde_yaml::Value;
use thiserror::Error;

use crate::core::FlatTable;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse `text` as YAML and flatten it into dotted keys.
///
/// Fails on anything the YAML parser rejects, including multi-document
/// streams. An empty document yields an empty table.
pub fn flatten_strict(text: &str) -> Result<FlatTable, ParseError> {
    let root: Value = serde_yaml::from_str(text)?;
    let mut table = FlatTable::new();
    flatten_value(&root, "", &mut table);
    Ok(table)
}

fn flatten_value(value: &Value, prefix: &str, table: &mut FlatTable) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(segment) = scalar_to_string(key).filter(|k| !k.trim().is_empty())
                else {
                    continue;
                };
                let path = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten_value(child, &path, table);
            }
        }
        Value::Sequence(items) => {
            let joined = items
                .iter()
                .filter_map(leaf_to_string)
                .collect::<Vec<_>>()
                .join(", ");
            table.insert(prefix, joined);
        }
        Value::Tagged(tagged) => flatten_value(&tagged.value, prefix, table),
        Value::Null => table.insert(prefix, ""),
        scalar => {
            if let Some(text) = leaf_to_string(scalar) {
                table.insert(prefix, text);
            }
        }
    }
}

/// Stored form of a scalar value. Block scalars lose their final newlines,
/// as in the tolerant parser.
fn leaf_to_string(value: &Value) -> Option<String> {
    scalar_to_string(value).map(|text| text.trim_end_matches('\n').to_string())
}

/// String form of a scalar. `None` for collections.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
