//! Expansion of short key references into fully qualified candidates.

use serde::Serialize;

/// Where in calling source code a key reference was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeContext {
    pub file_stem: Option<String>,
    pub class_name: Option<String>,
    pub function_name: Option<String>,
}

impl ScopeContext {
    /// Build a context; blank parts are treated as absent.
    pub fn new(
        file_stem: Option<&str>,
        class_name: Option<&str>,
        function_name: Option<&str>,
    ) -> Self {
        Self {
            file_stem: non_blank(file_stem),
            class_name: non_blank(class_name),
            function_name: non_blank(function_name),
        }
    }

    fn file(&self) -> Option<&str> {
        self.file_stem.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn class(&self) -> Option<&str> {
        self.class_name.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn function(&self) -> Option<&str> {
        self.function_name.as_deref().filter(|s| !s.trim().is_empty())
    }
}

fn non_blank(part: Option<&str>) -> Option<String> {
    part.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Keys to try for `raw`, most specific first, without duplicates.
///
/// The literal text is tried before its hyphenated variant (`ban_user` →
/// `ban-user`). A dotted variant is taken as fully qualified; otherwise it is
/// prefixed with every available combination of the scope parts.
pub fn candidate_keys(raw: &str, scope: &ScopeContext) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let mut variants = vec![raw.to_string()];
    if raw.contains('_') {
        variants.push(raw.replace('_', "-"));
    }

    let mut candidates: Vec<String> = Vec::new();
    let mut push = |key: String| {
        if !candidates.contains(&key) {
            candidates.push(key);
        }
    };

    for variant in &variants {
        if variant.contains('.') {
            push(variant.clone());
            continue;
        }

        let file = scope.file();
        let class = scope.class();
        let function = scope.function();

        if let Some(file) = file {
            if let (Some(class), Some(function)) = (class, function) {
                push(format!("{file}.{class}.{function}.{variant}"));
            }
            if let Some(class) = class {
                push(format!("{file}.{class}.{variant}"));
            }
            if let Some(function) = function {
                push(format!("{file}.{function}.{variant}"));
            }
            push(format!("{file}.{variant}"));
            push(format!("{file}.general.{variant}"));
        }
        push(format!("general.{variant}"));
        push(variant.clone());
    }

    candidates
}
