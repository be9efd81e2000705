//! Building a snapshot from a list of files.
//!
//! Files are scanned in parallel, then merged one by one in input order so
//! that "last file wins" is deterministic.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::{
    reader::SourceReader,
    snapshot::{FileRecord, IndexSnapshot, IndexStats, ParseOutcome, ReloadDiagnostic},
};
use crate::core::{
    FlatTable, LocationMap, Settings,
    language::{LanguageGuess, SiblingIndex, guess_language},
    parsers::{KeyPosition, ParseMode, flatten, locate_keys},
};

/// Result of scanning one file, before merging.
struct FileScan {
    file_path: String,
    guess: LanguageGuess,
    content: Result<ParsedFile, String>,
}

struct ParsedFile {
    table: FlatTable,
    mode: ParseMode,
    fallback_reason: Option<String>,
    positions: HashMap<String, KeyPosition>,
}

pub(super) fn build_snapshot<R>(
    paths: &[PathBuf],
    reader: &R,
    settings: &Settings,
    generation: u64,
) -> IndexSnapshot
where
    R: SourceReader + ?Sized,
{
    let relative: Vec<&Path> = paths
        .iter()
        .map(|path| path.strip_prefix(&settings.root).unwrap_or(path))
        .collect();
    let siblings = SiblingIndex::from_paths(&relative);

    let scans: Vec<FileScan> = paths
        .par_iter()
        .zip(relative.par_iter())
        .map(|(path, relative)| scan_file(path, relative, reader, &siblings, settings))
        .collect();

    merge(scans, paths.len(), generation)
}

fn scan_file<R>(
    path: &Path,
    relative: &Path,
    reader: &R,
    siblings: &SiblingIndex,
    settings: &Settings,
) -> FileScan
where
    R: SourceReader + ?Sized,
{
    let guess = guess_language(
        relative,
        siblings,
        &settings.default_language,
        &settings.fallback_language,
    );

    let content = reader
        .read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}")))
        .map(|text| {
            let positions = locate_keys(&text);
            let flattened = flatten(&text);
            ParsedFile {
                table: flattened.table,
                mode: flattened.mode,
                fallback_reason: flattened.fallback_reason,
                positions,
            }
        });

    FileScan {
        file_path: path.to_string_lossy().to_string(),
        guess,
        content,
    }
}

fn merge(scans: Vec<FileScan>, file_count: usize, generation: u64) -> IndexSnapshot {
    let mut languages: IndexMap<_, FlatTable> = IndexMap::new();
    let mut locations: IndexMap<_, LocationMap> = IndexMap::new();
    let mut files = Vec::with_capacity(scans.len());
    let mut diagnostics = Vec::new();
    let mut stats = IndexStats {
        file_count,
        ..IndexStats::default()
    };

    for FileScan {
        file_path,
        guess,
        content,
    } in scans
    {
        let language = guess.language;
        let parsed = match content {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(file = %file_path, %error, "skipping unreadable language file");
                stats.failed_parse_count += 1;
                files.push(FileRecord {
                    file_path: file_path.clone(),
                    language,
                    tagged: guess.tagged,
                    outcome: ParseOutcome::Failed,
                    entry_count: 0,
                });
                diagnostics.push(ReloadDiagnostic::ReadFailed { file_path, error });
                continue;
            }
        };
        stats.loaded_file_count += 1;

        let file_locations = locations.entry(language.clone()).or_default();
        for (key, position) in parsed.positions {
            file_locations.insert(key, position.into_location(&file_path));
        }

        let entry_count = parsed.table.len();
        let outcome = match parsed.mode {
            ParseMode::Strict => ParseOutcome::Strict,
            ParseMode::Tolerant => {
                let reason = parsed.fallback_reason.unwrap_or_default();
                debug!(file = %file_path, %reason, "strict parse failed, used tolerant parser");
                diagnostics.push(ReloadDiagnostic::TolerantFallback {
                    file_path: file_path.clone(),
                    reason,
                });
                if entry_count == 0 {
                    warn!(file = %file_path, "no entries found in language file");
                    diagnostics.push(ReloadDiagnostic::Empty {
                        file_path: file_path.clone(),
                    });
                    ParseOutcome::Failed
                } else {
                    ParseOutcome::Tolerant
                }
            }
        };
        match outcome {
            ParseOutcome::Strict => stats.strict_parse_count += 1,
            ParseOutcome::Tolerant => stats.tolerant_parse_count += 1,
            ParseOutcome::Failed => stats.failed_parse_count += 1,
        }
        debug!(
            file = %file_path,
            language = %language,
            ?outcome,
            entry_count,
            "indexed language file"
        );

        languages
            .entry(language.clone())
            .or_default()
            .merge(parsed.table);
        files.push(FileRecord {
            file_path,
            language,
            tagged: guess.tagged,
            outcome,
            entry_count,
        });
    }

    let mut snapshot = IndexSnapshot {
        languages,
        locations,
        files,
        diagnostics,
        stats,
        generation,
    };
    snapshot.stats.language_count = snapshot.languages.len();
    snapshot.stats.unique_key_count = snapshot.all_keys().len();
    snapshot.stats.total_entry_count = snapshot.languages.values().map(FlatTable::len).sum();
    snapshot
}
