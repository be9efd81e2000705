use std::path::PathBuf;

use super::{LanguageCode, language::STATIC_FALLBACK_LANGUAGE};

/// Index settings supplied by the caller, fixed for one reload cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Folder containing the language files.
    pub root: PathBuf,
    /// Language consulted first during resolution.
    pub default_language: LanguageCode,
    /// Language consulted when the default language lacks a key.
    pub fallback_language: LanguageCode,
}

impl Settings {
    pub fn new(
        root: impl Into<PathBuf>,
        default_language: impl AsRef<str>,
        fallback_language: impl AsRef<str>,
    ) -> Self {
        let default_language =
            LanguageCode::or_default(default_language, STATIC_FALLBACK_LANGUAGE);
        let fallback_language =
            LanguageCode::or_default(fallback_language, default_language.as_str());
        Self {
            root: root.into(),
            default_language,
            fallback_language,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(".", STATIC_FALLBACK_LANGUAGE, STATIC_FALLBACK_LANGUAGE)
    }
}
