//! Published index state and the queries over it.

use std::{collections::BTreeSet, fmt};

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::{
    FlatTable, KeyLocation, LanguageCode, LocationMap, ResolvedTranslation, Settings,
    candidates::{ScopeContext, candidate_keys},
};

/// Detail shown for completion items without any translation.
pub const UNTRANSLATED_MARKER: &str = "⚠️ Not translated";

/// How one enumerated file ended up in the index. Exactly one per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseOutcome {
    Strict,
    Tolerant,
    Failed,
}

/// Per-file result of the last reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_path: String,
    pub language: LanguageCode,
    /// Whether the language came from the file name or directory.
    pub tagged: bool,
    pub outcome: ParseOutcome,
    pub entry_count: usize,
}

/// Something noteworthy that happened to one file during a reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ReloadDiagnostic {
    /// The file could not be read or was not valid UTF-8. It was skipped.
    ReadFailed { file_path: String, error: String },
    /// The strict parser rejected the file; the tolerant parser was used.
    TolerantFallback { file_path: String, reason: String },
    /// The tolerant parser found no entries.
    Empty { file_path: String },
}

impl ReloadDiagnostic {
    pub fn file_path(&self) -> &str {
        match self {
            Self::ReadFailed { file_path, .. }
            | Self::TolerantFallback { file_path, .. }
            | Self::Empty { file_path } => file_path,
        }
    }
}

impl fmt::Display for ReloadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { file_path, error } => {
                write!(f, "{file_path}: failed to read: {error}")
            }
            Self::TolerantFallback { file_path, reason } => {
                write!(f, "{file_path}: parsed with tolerant parser ({reason})")
            }
            Self::Empty { file_path } => write!(f, "{file_path}: no entries found"),
        }
    }
}

/// Aggregate counters of one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Files enumerated for the reload.
    pub file_count: usize,
    /// Files that were read and decoded.
    pub loaded_file_count: usize,
    pub language_count: usize,
    /// Distinct keys across all languages.
    pub unique_key_count: usize,
    /// Sum of table sizes over all languages.
    pub total_entry_count: usize,
    pub strict_parse_count: usize,
    pub tolerant_parse_count: usize,
    pub failed_parse_count: usize,
}

/// A completion proposal for a partially typed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Text to insert, relative to the file prefix when one applies.
    pub insert_text: String,
    pub key: String,
    /// Resolved translation, if any language has one.
    pub translation: Option<String>,
}

impl Completion {
    pub fn detail(&self) -> &str {
        self.translation
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(UNTRANSLATED_MARKER)
    }
}

/// Translation coverage of one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRow {
    pub key: String,
    /// Number of languages that define the key.
    pub translations: usize,
    pub has_missing_translations: bool,
}

/// Keys belonging to one source file, plus the shared `general.*` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOverview {
    pub file_stem: String,
    pub languages_total: usize,
    pub base_keys: Vec<KeyRow>,
    pub general_keys: Vec<KeyRow>,
}

/// One immutable generation of index state.
///
/// Languages are kept in the order they were first seen during the reload,
/// which is the order the any-language fallback scans them in.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    pub(super) languages: IndexMap<LanguageCode, FlatTable>,
    pub(super) locations: IndexMap<LanguageCode, LocationMap>,
    pub(super) files: Vec<FileRecord>,
    pub(super) diagnostics: Vec<ReloadDiagnostic>,
    pub(super) stats: IndexStats,
    pub(super) generation: u64,
}

impl IndexSnapshot {
    /// Reload counter; 0 for the initial empty snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn diagnostics(&self) -> &[ReloadDiagnostic] {
        &self.diagnostics
    }

    pub fn languages(&self) -> Vec<LanguageCode> {
        self.languages.keys().cloned().collect()
    }

    pub fn table(&self, language: &str) -> Option<&FlatTable> {
        self.languages.get(LanguageCode::new(language).as_str())
    }

    /// Look up `key` in the default language, then the fallback language,
    /// then every language in stored order.
    pub fn resolve(&self, key: &str, settings: &Settings) -> Option<ResolvedTranslation> {
        let found = |language: &LanguageCode, from_default: bool| {
            self.languages
                .get(language)
                .and_then(|table| table.get(key))
                .map(|value| ResolvedTranslation {
                    key: key.to_string(),
                    value: value.to_string(),
                    language: language.clone(),
                    from_default,
                })
        };

        found(&settings.default_language, true)
            .or_else(|| found(&settings.fallback_language, false))
            .or_else(|| {
                self.languages
                    .keys()
                    .find_map(|language| found(language, false))
            })
    }

    /// Every language defining `key`, in stored order.
    pub fn resolve_all_languages(&self, key: &str) -> IndexMap<LanguageCode, String> {
        self.languages
            .iter()
            .filter_map(|(language, table)| {
                table
                    .get(key)
                    .map(|value| (language.clone(), value.to_string()))
            })
            .collect()
    }

    /// Resolve the first candidate of `raw` in `scope` that any language defines.
    pub fn resolve_in_context(
        &self,
        raw: &str,
        scope: &ScopeContext,
        settings: &Settings,
    ) -> Option<ResolvedTranslation> {
        candidate_keys(raw, scope)
            .iter()
            .find_map(|key| self.resolve(key, settings))
    }

    pub fn locate(&self, language: &str, key: &str) -> Option<&KeyLocation> {
        self.locations
            .get(LanguageCode::new(language).as_str())
            .and_then(|locations| locations.get(key))
    }

    /// First location of `key` across languages in stored order.
    pub fn locate_any(&self, key: &str) -> Option<&KeyLocation> {
        self.locations
            .values()
            .find_map(|locations| locations.get(key))
    }

    /// Location of `key` in `preferred`, else the default language, else the
    /// fallback language, else any language.
    pub fn locate_preferred(
        &self,
        preferred: Option<&str>,
        key: &str,
        settings: &Settings,
    ) -> Option<&KeyLocation> {
        preferred
            .and_then(|language| self.locate(language, key))
            .or_else(|| self.locate(settings.default_language.as_str(), key))
            .or_else(|| self.locate(settings.fallback_language.as_str(), key))
            .or_else(|| self.locate_any(key))
    }

    /// Union of keys over all languages, sorted.
    pub fn all_keys(&self) -> BTreeSet<String> {
        self.languages
            .values()
            .flat_map(|table| table.keys().cloned())
            .collect()
    }

    /// Completion proposals for a key being typed in a source file.
    ///
    /// Without a dot in `typed_prefix`, only keys of the file (`stem.*`) and
    /// shared keys (`general.*`) are offered, and the file prefix is dropped
    /// from the inserted text. A prefix that cannot start a key yields nothing.
    pub fn completions(
        &self,
        typed_prefix: &str,
        file_stem: Option<&str>,
        settings: &Settings,
    ) -> Vec<Completion> {
        if !typed_prefix.chars().all(is_key_char) {
            return Vec::new();
        }

        let wants_qualified = typed_prefix.contains('.');
        let file_prefix = file_stem
            .map(str::trim)
            .filter(|stem| !stem.is_empty())
            .map(|stem| format!("{stem}."));

        let mut completions: Vec<Completion> = self
            .all_keys()
            .into_iter()
            .filter(|key| match &file_prefix {
                Some(prefix) if !wants_qualified => {
                    key.starts_with(prefix.as_str()) || key.starts_with("general.")
                }
                _ => true,
            })
            .filter_map(|key| {
                let insert_text = match &file_prefix {
                    Some(prefix) if !wants_qualified => key
                        .strip_prefix(prefix.as_str())
                        .unwrap_or(key.as_str())
                        .to_string(),
                    _ => key.clone(),
                };
                if !insert_text.starts_with(typed_prefix) {
                    return None;
                }
                let translation = self.resolve(&key, settings).map(|r| r.value);
                Some(Completion {
                    insert_text,
                    key,
                    translation,
                })
            })
            .collect();

        completions.sort_by(|a, b| {
            a.insert_text
                .cmp(&b.insert_text)
                .then_with(|| a.key.cmp(&b.key))
        });
        completions
    }

    /// Translation coverage of the keys under `file_stem.` and `general.`.
    pub fn key_overview(&self, file_stem: &str) -> KeyOverview {
        let languages_total = self.languages.len();
        let prefix = format!("{file_stem}.");
        let all_keys = self.all_keys();

        let rows = |wanted: &str| -> Vec<KeyRow> {
            all_keys
                .iter()
                .filter(|key| key.starts_with(wanted))
                .map(|key| {
                    let translations = self
                        .languages
                        .values()
                        .filter(|table| table.contains_key(key))
                        .count();
                    KeyRow {
                        key: key.clone(),
                        translations,
                        has_missing_translations: translations < languages_total,
                    }
                })
                .collect()
        };

        KeyOverview {
            file_stem: file_stem.to_string(),
            languages_total,
            base_keys: rows(&prefix),
            general_keys: rows("general."),
        }
    }
}

/// Characters that may appear in a key reference.
pub(crate) fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}
