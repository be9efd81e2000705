//! Helpers for finding key references in Python source.
//!
//! These are line based: good enough to find the string literal under a
//! cursor and the `class`/`def` it sits in, without a Python parser.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{candidates::ScopeContext, index::snapshot::is_key_char};

/// How far upward to look for an enclosing function.
const MAX_FUNCTION_LOOKBACK: usize = 250;
/// How far upward to look for an enclosing class.
const MAX_CLASS_LOOKBACK: usize = 400;

static FUNCTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:async\s+def|def)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap()
});
static CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*class\s+([A-Za-z_][A-Za-z0-9_]*)\s*[(:]").unwrap());
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// A string literal found on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PythonString {
    pub quote: char,
    /// Raw contents between the quotes.
    pub value: String,
    pub line: usize,
    /// Column of the first character inside the quotes.
    pub start_col: usize,
    /// Column of the closing quote.
    pub end_col: usize,
}

/// Names of the `class` and `def` enclosing a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnclosingScope {
    pub class_name: Option<String>,
    pub function_name: Option<String>,
}

/// The string literal containing the 0-based (`line`, `column`) position.
///
/// Columns count characters. The cursor may sit anywhere from just after the
/// opening quote up to the closing quote. Escaped quotes are skipped.
pub fn string_at(source: &str, line: usize, column: usize) -> Option<PythonString> {
    let text: Vec<char> = source.lines().nth(line)?.chars().collect();
    if column > text.len() {
        return None;
    }

    let start = (0..column.min(text.len()))
        .rev()
        .find(|&i| matches!(text[i], '"' | '\'') && !is_escaped(&text, i))?;
    let quote = text[start];
    let end = (start + 1..text.len()).find(|&i| text[i] == quote && !is_escaped(&text, i))?;

    if column < start + 1 || column > end {
        return None;
    }

    Some(PythonString {
        quote,
        value: text[start + 1..end].iter().collect(),
        line,
        start_col: start + 1,
        end_col: end,
    })
}

fn is_escaped(text: &[char], index: usize) -> bool {
    text[..index]
        .iter()
        .rev()
        .take_while(|c| **c == '\\')
        .count()
        % 2
        == 1
}

/// Nearest enclosing `class` and `def` of `line`.
///
/// Scans upward; each line indented less than everything seen so far opens
/// an enclosing block. The line itself counts, so a cursor on a `def` line
/// is inside that function.
pub fn enclosing_scope(source: &str, line: usize) -> EnclosingScope {
    let lines: Vec<&str> = source.lines().collect();
    let Some(start) = lines.get(line) else {
        return EnclosingScope::default();
    };

    let mut scope = EnclosingScope::default();
    let mut bound = indent_of(start) + 1;
    for i in (line.saturating_sub(MAX_CLASS_LOOKBACK)..=line).rev() {
        let text = lines[i];
        if text.trim().is_empty() {
            continue;
        }
        let indent = indent_of(text);
        if indent >= bound {
            continue;
        }
        bound = indent;

        if scope.function_name.is_none()
            && line - i <= MAX_FUNCTION_LOOKBACK
            && let Some(caps) = FUNCTION_REGEX.captures(text)
        {
            scope.function_name = Some(caps[1].to_string());
        } else if scope.class_name.is_none()
            && let Some(caps) = CLASS_REGEX.captures(text)
        {
            scope.class_name = Some(caps[1].to_string());
        }
        if bound == 0 {
            break;
        }
    }
    scope
}

fn indent_of(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// Key references inside a string value: the whole value if it looks like a
/// key, then every key-like `{placeholder}`. Without duplicates.
pub fn find_keys_in_string(value: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut add = |candidate: &str| {
        if !candidate.is_empty()
            && candidate.chars().all(is_key_char)
            && !keys.iter().any(|k| k == candidate)
        {
            keys.push(candidate.to_string());
        }
    };

    add(value.trim());
    for caps in PLACEHOLDER_REGEX.captures_iter(value) {
        add(caps[1].trim());
    }
    keys
}

/// Stem of a Python source file; `None` for other files.
pub fn file_stem_for(path: &Path) -> Option<String> {
    let is_python = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("py"));
    if !is_python {
        return None;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

impl ScopeContext {
    /// The scope of a position in a Python file.
    pub fn at(path: &Path, source: &str, line: usize) -> Self {
        let scope = enclosing_scope(source, line);
        Self {
            file_stem: file_stem_for(path),
            class_name: scope.class_name,
            function_name: scope.function_name,
        }
    }
}
