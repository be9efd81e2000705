//! Line-oriented indentation walk over YAML-like text.
//!
//! Both the tolerant value parser and the key location scanner are visitors
//! of this walk, so they always agree on how dotted paths are built and on
//! which lines belong to block scalars or multi-line quoted values.
//!
//! The walk keeps a stack of `(indent, dotted prefix)` scopes seeded with
//! `(-1, "")`. For every `key: rest` line the scopes at or below the line's
//! indentation are closed, the key is appended to the innermost open prefix
//! and the visitor is told what kind of value follows.

/// A `key: rest` line as seen by a visitor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyLine<'a> {
    /// Line number (0-indexed).
    pub line: usize,
    /// Column of the key token, after any `- ` sequence prefix (0-indexed).
    pub col: usize,
    /// Key token as written (trimmed, quotes preserved).
    pub raw_key: &'a str,
    /// Full dotted path of the key.
    pub path: &'a str,
}

/// The value that follows a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineValue<'a> {
    /// Nothing after the colon: the key opens a nested scope.
    Scope,
    /// Literal (`|`) or folded (`>`) block content, dedented.
    Block(String),
    /// Unescaped content of a quoted value, possibly spanning lines.
    Quoted(String),
    /// Plain value with any inline comment removed.
    Plain(&'a str),
}

/// Receives the structural events of a walk.
pub(crate) trait LineVisitor {
    fn key(&mut self, key: &KeyLine<'_>, value: LineValue<'_>);

    /// A scalar sequence item (`- value`) directly under `parent`.
    fn item(&mut self, _parent: &str, _value: &str) {}
}

struct Scope {
    indent: isize,
    prefix: String,
}

pub(crate) fn walk<V: LineVisitor>(text: &str, visitor: &mut V) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut stack = vec![Scope {
        indent: -1,
        prefix: String::new(),
    }];

    let mut i = 0;
    while i < lines.len() {
        let raw = lines[i];
        let indent = count_indent(raw);
        let content = raw[indent..].trim_end();
        let body = content.trim_start();

        if body.is_empty() || body.starts_with('#') {
            i += 1;
            continue;
        }

        let mut col = indent + (content.len() - body.len());
        let mut body = body;
        let mut is_item = false;

        // Strip sequence dashes; a dash must be followed by whitespace.
        while let Some(after) = body.strip_prefix('-') {
            let trimmed = after.trim_start();
            if trimmed.len() == after.len() {
                break;
            }
            col += 1 + (after.len() - trimmed.len());
            body = trimmed;
            is_item = true;
        }
        if body.starts_with('-') && !is_item {
            // "-foo", "---" and similar are not key lines
            i += 1;
            continue;
        }

        // Items may sit at the same indentation as their parent key
        // (`key:\n- a`), so only strictly deeper scopes are closed for them.
        let line_indent = indent as isize;
        while stack.len() > 1 {
            let top = stack[stack.len() - 1].indent;
            let closes = if is_item {
                top > line_indent
            } else {
                top >= line_indent
            };
            if !closes {
                break;
            }
            stack.pop();
        }

        let parent = &stack[stack.len() - 1].prefix;

        // On item lines `- http://x` is a scalar, not the key `http`.
        let split = split_key(body).filter(|(_, rest)| {
            !is_item || rest.is_empty() || rest.starts_with(char::is_whitespace)
        });
        let Some((raw_key, rest)) = split else {
            if is_item && !parent.is_empty() && !body.starts_with('#') {
                let value = decode_item(body);
                visitor.item(parent, &value);
            }
            i += 1;
            continue;
        };

        let key = normalize_key(raw_key);
        if key.is_empty() {
            i += 1;
            continue;
        }

        let path = if parent.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", parent, key)
        };
        // A key on an item line scopes its children by the key column.
        let key_indent = if is_item { col } else { indent };
        let key_line = KeyLine {
            line: i,
            col,
            raw_key,
            path: &path,
        };
        let rest = rest.trim();

        if rest.is_empty() || rest.starts_with('#') {
            visitor.key(&key_line, LineValue::Scope);
            stack.push(Scope {
                indent: key_indent as isize,
                prefix: path,
            });
            i += 1;
            continue;
        }

        if is_block_indicator(rest) {
            let (value, next) = read_block(&lines, i, key_indent);
            visitor.key(&key_line, LineValue::Block(value));
            i = next;
            continue;
        }

        if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
            let (value, end) = read_quoted(&lines, i, rest, quote);
            visitor.key(&key_line, LineValue::Quoted(value));
            i = end + 1;
            continue;
        }

        visitor.key(&key_line, LineValue::Plain(strip_inline_comment(rest)));
        i += 1;
    }
}

/// Number of leading spaces.
pub(crate) fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Split `key: rest` at the first colon, with or without following whitespace.
///
/// A key starting with a quote runs to its matching quote, so colons inside
/// quoted keys are not separators. Unquoted keys cannot contain `#`.
pub(crate) fn split_key(body: &str) -> Option<(&str, &str)> {
    let first = body.chars().next()?;
    let search_from = if first == '"' || first == '\'' {
        find_closing_quote(&body[1..], first)? + 2
    } else {
        0
    };

    let offset = body[search_from..].find([':', '#'])?;
    let pos = search_from + offset;
    if body[pos..].starts_with('#') {
        return None;
    }
    let key = body[..pos].trim_end();
    if key.is_empty() {
        return None;
    }
    Some((key, &body[pos + 1..]))
}

/// Trim a key and remove one pair of matching surrounding quotes.
pub(crate) fn normalize_key(raw: &str) -> &str {
    let key = raw.trim();
    ['"', '\'']
        .iter()
        .find_map(|q| {
            key.strip_prefix(*q)
                .and_then(|inner| inner.strip_suffix(*q))
        })
        .unwrap_or(key)
        .trim()
}

/// Remove a trailing `# comment` (a `#` preceded by whitespace).
pub(crate) fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return value[..i].trim();
        }
    }
    value.trim()
}

fn is_block_indicator(rest: &str) -> bool {
    matches!(
        strip_inline_comment(rest),
        "|" | ">" | "|-" | "|+" | ">-" | ">+"
    )
}

/// Collect the lines of a block scalar that starts after line `start`.
///
/// Returns the dedented content and the index of the first line that is not
/// part of the block.
fn read_block(lines: &[&str], start: usize, base_indent: usize) -> (String, usize) {
    let mut collected: Vec<&str> = Vec::new();
    let mut block_indent: Option<usize> = None;

    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            collected.push("");
            i += 1;
            continue;
        }

        let indent = count_indent(line);
        if indent <= base_indent {
            break;
        }

        let strip = *block_indent.get_or_insert(indent);
        collected.push(&line[indent.min(strip)..]);
        i += 1;
    }

    while collected.last() == Some(&"") {
        collected.pop();
    }

    (collected.join("\n"), i)
}

/// Read a quoted value starting on line `start`, continuing onto following
/// lines until the closing quote.
///
/// Returns the unescaped value and the index of the line holding the closing
/// quote (or the last line when the quote is never closed).
fn read_quoted(lines: &[&str], start: usize, rest: &str, quote: char) -> (String, usize) {
    let mut buffer = rest[1..].to_string();
    let mut line = start;

    loop {
        if let Some(end) = find_closing_quote(&buffer, quote) {
            return (unescape(&buffer[..end], quote), line);
        }

        line += 1;
        if line >= lines.len() {
            return (unescape(&buffer, quote), lines.len() - 1);
        }

        buffer.push('\n');
        buffer.push_str(lines[line].trim());
    }
}

/// Byte index of the closing quote in `s` (which starts after the opening quote).
fn find_closing_quote(s: &str, quote: char) -> Option<usize> {
    let bytes = s.as_bytes();
    let q = quote as u8;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if quote == '"' && b == b'\\' {
            i += 2;
            continue;
        }
        if b == q {
            if quote == '\'' && bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

fn unescape(raw: &str, quote: char) -> String {
    if quote == '\'' {
        raw.replace("''", "'")
    } else {
        unescape_double_quoted(raw)
    }
}

/// Resolve the escape sequences of a double-quoted value.
///
/// Unknown escapes are kept verbatim.
pub(crate) fn unescape_double_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            // Escaped line break joins the lines
            Some('\n') => {}
            Some('u') if next_is_brace(&chars) => {
                let hex: String = chars.clone().skip(1).take_while(|c| *c != '}').collect();
                match decode_code_point(&hex, 4..=6) {
                    Some(ch) if chars.clone().nth(hex.len() + 1) == Some('}') => {
                        out.push(ch);
                        for _ in 0..hex.len() + 2 {
                            chars.next();
                        }
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(kind @ ('u' | 'U' | 'x')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex: String = chars.clone().take(width).collect();
                match decode_code_point(&hex, width..=width) {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(kind);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn next_is_brace(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    chars.clone().next() == Some('{')
}

fn decode_code_point(hex: &str, widths: std::ops::RangeInclusive<usize>) -> Option<char> {
    if !widths.contains(&hex.len()) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Value of a scalar sequence item (`- value`).
fn decode_item(body: &str) -> String {
    match body.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &body[1..];
            match find_closing_quote(inner, quote) {
                Some(end) => unescape(&inner[..end], quote),
                None => unescape(inner, quote),
            }
        }
        _ => strip_inline_comment(body).to_string(),
    }
}
