//! The language index.
//!
//! ## Module Structure
//!
//! - `reader`: SourceReader trait with disk and in-memory implementations
//! - `build`: parallel per-file scan and sequential merge into a snapshot
//! - `snapshot`: IndexSnapshot and all read-only queries
//!
//! ## Concurrency
//!
//! State is published as an `Arc<IndexSnapshot>` behind a `RwLock`. Readers
//! clone the `Arc` and query without holding any lock, so they see either the
//! previous or the next generation, never a half-built one. Reloads are
//! serialized by a separate mutex; a reload triggered while another is running
//! waits for it to finish.

mod build;
pub mod reader;
pub mod snapshot;

use std::{
    collections::BTreeSet,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use anyhow::Result;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{info, warn};

pub use reader::{FsReader, MemoryReader, SourceReader};
pub use snapshot::{
    Completion, FileRecord, IndexSnapshot, IndexStats, KeyOverview, KeyRow, ParseOutcome,
    ReloadDiagnostic, UNTRANSLATED_MARKER,
};

use crate::core::{
    KeyLocation, LanguageCode, ResolvedTranslation, Settings, candidates::ScopeContext,
    file_scanner::scan_language_files,
};

/// Handle returned by [`LanguageIndex::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&IndexSnapshot) + Send + Sync>;

/// Summary of one reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadReport {
    pub generation: u64,
    pub stats: IndexStats,
    pub diagnostics: Vec<ReloadDiagnostic>,
    /// Paths skipped during discovery because they could not be accessed.
    pub skipped_paths: usize,
}

impl ReloadReport {
    fn from_snapshot(snapshot: &IndexSnapshot) -> Self {
        Self {
            generation: snapshot.generation(),
            stats: snapshot.stats(),
            diagnostics: snapshot.diagnostics().to_vec(),
            skipped_paths: 0,
        }
    }
}

/// Queryable index of translations across all languages.
///
/// Lifecycle: [`LanguageIndex::new`], any number of reloads, then
/// [`LanguageIndex::dispose`].
pub struct LanguageIndex {
    current: RwLock<Arc<IndexSnapshot>>,
    reload_lock: Mutex<()>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
    disposed: AtomicBool,
}

impl Default for LanguageIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageIndex {
    /// An empty index (generation 0).
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(IndexSnapshot::default())),
            reload_lock: Mutex::new(()),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Rebuild the index from `paths` and publish the result.
    ///
    /// Per-file failures are recorded in the report and never abort the
    /// reload. After [`LanguageIndex::dispose`] this does nothing.
    pub fn reload<R>(&self, paths: &[PathBuf], reader: &R, settings: &Settings) -> ReloadReport
    where
        R: SourceReader + ?Sized,
    {
        let _guard = self.reload_lock.lock();
        if self.is_disposed() {
            warn!("reload requested on a disposed language index");
            return ReloadReport::from_snapshot(&self.snapshot());
        }

        let generation = self.current.read().generation() + 1;
        let snapshot = Arc::new(build::build_snapshot(paths, reader, settings, generation));
        let stats = snapshot.stats();
        info!(
            generation,
            files = stats.file_count,
            languages = stats.language_count,
            keys = stats.unique_key_count,
            strict = stats.strict_parse_count,
            tolerant = stats.tolerant_parse_count,
            failed = stats.failed_parse_count,
            "language index reloaded"
        );

        *self.current.write() = Arc::clone(&snapshot);
        self.notify(&snapshot);
        ReloadReport::from_snapshot(&snapshot)
    }

    /// Discover `*.yml`/`*.yaml` files under `settings.root` and reload from disk.
    pub fn reload_from_disk(
        &self,
        settings: &Settings,
        ignores: &[String],
    ) -> Result<ReloadReport> {
        let scan = scan_language_files(&settings.root, ignores)?;
        let mut report = self.reload(&scan.files, &FsReader, settings);
        report.skipped_paths = scan.skipped_count;
        Ok(report)
    }

    pub fn resolve(&self, key: &str, settings: &Settings) -> Option<ResolvedTranslation> {
        self.snapshot().resolve(key, settings)
    }

    pub fn resolve_all_languages(&self, key: &str) -> IndexMap<LanguageCode, String> {
        self.snapshot().resolve_all_languages(key)
    }

    pub fn resolve_in_context(
        &self,
        raw: &str,
        scope: &ScopeContext,
        settings: &Settings,
    ) -> Option<ResolvedTranslation> {
        self.snapshot().resolve_in_context(raw, scope, settings)
    }

    pub fn locate(&self, language: &str, key: &str) -> Option<KeyLocation> {
        self.snapshot().locate(language, key).cloned()
    }

    pub fn locate_any(&self, key: &str) -> Option<KeyLocation> {
        self.snapshot().locate_any(key).cloned()
    }

    pub fn locate_preferred(
        &self,
        preferred: Option<&str>,
        key: &str,
        settings: &Settings,
    ) -> Option<KeyLocation> {
        self.snapshot()
            .locate_preferred(preferred, key, settings)
            .cloned()
    }

    pub fn all_keys(&self) -> BTreeSet<String> {
        self.snapshot().all_keys()
    }

    pub fn languages(&self) -> Vec<LanguageCode> {
        self.snapshot().languages()
    }

    pub fn stats(&self) -> IndexStats {
        self.snapshot().stats()
    }

    pub fn completions(
        &self,
        typed_prefix: &str,
        file_stem: Option<&str>,
        settings: &Settings,
    ) -> Vec<Completion> {
        self.snapshot()
            .completions(typed_prefix, file_stem, settings)
    }

    pub fn key_overview(&self, file_stem: &str) -> KeyOverview {
        self.snapshot().key_overview(file_stem)
    }

    /// Register a callback run after every published reload.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&IndexSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, Arc::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Drop all observers and state. Later reloads are ignored.
    pub fn dispose(&self) {
        let _guard = self.reload_lock.lock();
        self.disposed.store(true, Ordering::Release);
        self.observers.lock().clear();
        *self.current.write() = Arc::new(IndexSnapshot::default());
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Observers run outside the observer lock so they may unsubscribe.
    fn notify(&self, snapshot: &IndexSnapshot) {
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(snapshot);
        }
    }
}
