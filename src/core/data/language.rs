use std::{borrow::Borrow, fmt};

use serde::Serialize;

/// Language used when neither the filename nor the configuration names one.
pub const STATIC_FALLBACK_LANGUAGE: &str = "en";

/// A short, case-insensitive language identifier such as `en` or `de`.
///
/// Codes are normalized on construction (trimmed, surrounding quotes removed,
/// lowercased), so equality and hashing are effectively case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(normalize_code(code.as_ref()))
    }

    /// Like [`LanguageCode::new`], but substitutes `fallback` for a blank code.
    pub fn or_default(code: impl AsRef<str>, fallback: &str) -> Self {
        let code = Self::new(code);
        if code.is_empty() {
            Self::new(fallback)
        } else {
            code
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive comparison against an arbitrary string.
    pub fn matches(&self, other: &str) -> bool {
        self.0 == normalize_code(other)
    }
}

fn normalize_code(code: &str) -> String {
    let code = code.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            code.strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(code);
    unquoted.trim().to_lowercase()
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}
