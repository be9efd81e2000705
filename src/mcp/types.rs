use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{
    Completion, FileRecord, IndexStats, KeyLocation, LanguageCode, ReloadDiagnostic,
    ResolvedTranslation,
};

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Parameters of tools that only need the project
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    /// Absolute path to the project root, where .langdexrc.json is searched from
    pub project_root_path: String,
}

// ============================================================
// Stats Types (get_stats, reload_index)
// ============================================================

/// Result of get_stats and reload_index
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    pub language_folder: String,
    pub default_language: LanguageCode,
    pub fallback_language: LanguageCode,
    pub generation: u64,
    pub stats: IndexStats,
    pub files: Vec<FileRecord>,
    pub diagnostics: Vec<ReloadDiagnostic>,
}

// ============================================================
// Languages Types (get_languages)
// ============================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesResult {
    pub default_language: LanguageCode,
    pub fallback_language: LanguageCode,
    pub languages: Vec<LanguageInfo>,
}

/// Information about a single language
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub language: LanguageCode,
    pub key_count: usize,
    pub file_count: usize,
}

// ============================================================
// Resolve Types (resolve_key, resolve_in_context)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveKeyParams {
    pub project_root_path: String,
    /// Fully qualified dotted key, e.g. "moderation.ban.success"
    pub key: String,
    /// Also return the value in every language defining the key
    #[serde(default)]
    pub all_languages: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveInContextParams {
    pub project_root_path: String,
    /// Key as written at the call site, possibly short (e.g. "success")
    pub key: String,
    /// Stem of the calling source file (e.g. "moderation")
    pub file_stem: Option<String>,
    pub class_name: Option<String>,
    pub function_name: Option<String>,
}

/// Value of a key in one language
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageValue {
    pub language: LanguageCode,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    pub key: String,
    /// Qualified keys tried, in order
    pub candidates: Vec<String>,
    pub found: bool,
    pub translation: Option<ResolvedTranslation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_languages: Option<Vec<LanguageValue>>,
}

// ============================================================
// Locate Types (locate_key)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocateKeyParams {
    pub project_root_path: String,
    pub key: String,
    /// Preferred language; falls back to default, fallback, then any language
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResult {
    pub key: String,
    pub found: bool,
    /// 0-based position of the key token
    pub location: Option<KeyLocation>,
    /// Column just past the key token, so `col..endCol` selects the key
    pub end_col: Option<usize>,
}

// ============================================================
// Keys Types (list_keys)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListKeysParams {
    pub project_root_path: String,
    /// Only keys starting with this prefix
    pub prefix: Option<String>,
    /// Number of items to skip (default 0)
    pub offset: Option<u32>,
    /// Maximum number of items (default 20, max 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysResult {
    pub total_count: usize,
    pub items: Vec<String>,
    pub pagination: Pagination,
}

// ============================================================
// Completion Types (get_completions)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCompletionsParams {
    pub project_root_path: String,
    /// Text typed so far
    #[serde(default)]
    pub prefix: String,
    /// Stem of the source file being edited
    pub file_stem: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionsResult {
    pub items: Vec<Completion>,
}
