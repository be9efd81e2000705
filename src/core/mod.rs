//! Core indexing engine.
//!
//! ## Module Structure
//!
//! - `data`: Shared data types (LanguageCode, FlatTable, KeyLocation, Settings)
//! - `parsers`: Strict and tolerant flatteners, key location scanner
//! - `language`: Language inference from file names
//! - `candidates`: Expansion of short key references into qualified keys
//! - `index`: LanguageIndex with reload, snapshot publishing and queries
//! - `file_scanner`: Discovery of language files on disk
//! - `python`: Key reference helpers for Python call sites

pub mod candidates;
pub mod data;
pub mod file_scanner;
pub mod index;
pub mod language;
pub mod parsers;
pub mod python;

pub use candidates::{ScopeContext, candidate_keys};
pub use data::{
    FlatTable, KeyLocation, LanguageCode, LocationMap, ResolvedTranslation,
    STATIC_FALLBACK_LANGUAGE, Settings,
};
pub use index::{
    Completion, FileRecord, FsReader, IndexSnapshot, IndexStats, KeyOverview, KeyRow,
    LanguageIndex, MemoryReader, ParseOutcome, ReloadDiagnostic, ReloadReport, SourceReader,
    SubscriptionId, UNTRANSLATED_MARKER,
};
pub use language::{LanguageGuess, SiblingIndex, guess_language};
pub use parsers::{Flattened, ParseError, ParseMode, flatten, locate_keys};
