//! Language inference from file names.
//!
//! Runs in two phases: [`SiblingIndex::from_paths`] looks at every file of a
//! reload pass, then [`guess_language`] classifies each file using it.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use crate::core::{LanguageCode, STATIC_FALLBACK_LANGUAGE};

/// Language suffixes observed per file base name (`messages_de` → `messages`: {`de`}).
#[derive(Debug, Clone, Default)]
pub struct SiblingIndex {
    suffixes: HashMap<String, HashSet<String>>,
}

impl SiblingIndex {
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut suffixes: HashMap<String, HashSet<String>> = HashMap::new();
        for path in paths {
            let Some(stem) = file_stem(path.as_ref()) else {
                continue;
            };
            if let Some((base, lang)) = split_language_suffix(stem) {
                suffixes
                    .entry(base.to_string())
                    .or_default()
                    .insert(lang.to_ascii_lowercase());
            }
        }
        Self { suffixes }
    }

    /// Number of distinct language suffixes seen for `base`.
    pub fn suffix_count(&self, base: &str) -> usize {
        self.suffixes.get(base).map_or(0, HashSet::len)
    }
}

/// Outcome of [`guess_language`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGuess {
    pub language: LanguageCode,
    /// Whether the file name or directory named the language explicitly.
    pub tagged: bool,
}

impl LanguageGuess {
    fn tagged(code: &str) -> Self {
        Self {
            language: LanguageCode::new(code),
            tagged: true,
        }
    }
}

/// Infer the language of `path`.
///
/// `path` should be relative to the language root so that only directories
/// below the root are considered by the directory rule. Rules, first match wins:
///
/// 1. the stem is a language code (`de.yml`)
/// 2. the stem has a corroborated language suffix (`messages_de.yml`), where
///    corroborated means the base has at least two distinct suffixes in the
///    pass, or the suffix is the default or fallback language
/// 3. the parent directory is a language code (`de/messages.yml`)
/// 4. otherwise the default language, untagged
pub fn guess_language(
    path: &Path,
    siblings: &SiblingIndex,
    default_language: &LanguageCode,
    fallback_language: &LanguageCode,
) -> LanguageGuess {
    if let Some(stem) = file_stem(path) {
        if is_language_code(stem) {
            return LanguageGuess::tagged(stem);
        }

        if let Some((base, lang)) = split_language_suffix(stem)
            && (siblings.suffix_count(base) >= 2
                || default_language.matches(lang)
                || fallback_language.matches(lang))
        {
            return LanguageGuess::tagged(lang);
        }
    }

    if let Some(dir) = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        && is_language_code(dir)
    {
        return LanguageGuess::tagged(dir);
    }

    LanguageGuess {
        language: LanguageCode::or_default(default_language, STATIC_FALLBACK_LANGUAGE),
        tagged: false,
    }
}

/// 2 to 5 ASCII letters.
fn is_language_code(s: &str) -> bool {
    (2..=5).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Split `base_lang` or `base-lang` at the last separator.
fn split_language_suffix(stem: &str) -> Option<(&str, &str)> {
    let pos = stem.rfind(['_', '-'])?;
    let (base, lang) = (&stem[..pos], &stem[pos + 1..]);
    (!base.is_empty() && is_language_code(lang)).then_some((base, lang))
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}
