use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths under the root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of discovering language files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Language files, sorted.
    pub files: Vec<PathBuf>,
    /// Paths that could not be accessed during the walk.
    pub skipped_count: usize,
}

/// Find every `*.yml`/`*.yaml` file under `root`.
///
/// Ignore patterns are matched against the path relative to `root`; a pattern
/// without wildcards excludes that path and everything below it.
pub fn scan_language_files(root: &Path, ignore_patterns: &[String]) -> Result<ScanResult> {
    if !root.is_dir() {
        bail!("Language folder not found: {}", root.display());
    }

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(PathBuf::from(p.trim_end_matches('/')));
        }
    }

    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                warn!(error = %e, "cannot access path");
                continue;
            }
        };
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| relative.starts_with(ignore_path))
        {
            continue;
        }

        let relative_str = relative.to_string_lossy().replace('\\', "/");
        if glob_patterns.iter().any(|p| p.matches(&relative_str)) {
            continue;
        }

        if entry.file_type().is_file() && is_language_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(ScanResult {
        files,
        skipped_count,
    })
}

fn is_language_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}
