use std::path::PathBuf;

use indexmap::IndexMap;

use crate::core::{
    Completion, FileRecord, IndexStats, KeyLocation, KeyOverview, LanguageCode,
    ReloadDiagnostic, ResolvedTranslation, ScopeContext, python::PythonString,
};

#[derive(Debug)]
pub enum CommandSummary {
    Stats(StatsSummary),
    Languages(Vec<LanguageSummary>),
    Keys(Vec<String>),
    Resolve(ResolveSummary),
    Locate(LocateSummary),
    Candidates(CandidatesSummary),
    Lookup(LookupSummary),
    Complete(Vec<Completion>),
    Overview(KeyOverview),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct StatsSummary {
    pub language_folder: PathBuf,
    pub generation: u64,
    pub stats: IndexStats,
    pub files: Vec<FileRecord>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct LanguageSummary {
    pub language: LanguageCode,
    pub key_count: usize,
    pub file_count: usize,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub query: String,
    /// Keys tried in order; just the query when no scope was given.
    pub candidates: Vec<String>,
    pub translation: Option<ResolvedTranslation>,
    /// Value per language, filled with `--all`.
    pub all_languages: Option<IndexMap<LanguageCode, String>>,
}

#[derive(Debug)]
pub struct LocateSummary {
    pub key: String,
    pub location: Option<KeyLocation>,
}

#[derive(Debug)]
pub struct CandidatesSummary {
    pub key: String,
    pub scope: ScopeContext,
    pub candidates: Vec<String>,
}

#[derive(Debug)]
pub struct LookupSummary {
    pub file: PathBuf,
    /// Cursor position as given (1-based).
    pub line: usize,
    pub column: usize,
    pub scope: ScopeContext,
    pub string: Option<PythonString>,
    /// Each key reference in the string and what it resolved to.
    pub references: Vec<(String, Option<ResolvedTranslation>)>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a langdex command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// False when the queried key, location or literal does not exist.
    pub found: bool,
    /// Problems reported while loading the index.
    pub diagnostics: Vec<ReloadDiagnostic>,
    /// Paths skipped during discovery due to access errors.
    pub skipped_paths: usize,
}

impl CommandResult {
    /// Result of a command that did not load the index.
    pub fn standalone(summary: CommandSummary, found: bool) -> Self {
        Self {
            summary,
            found,
            diagnostics: Vec::new(),
            skipped_paths: 0,
        }
    }
}
