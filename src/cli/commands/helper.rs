use anyhow::Result;

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Workspace},
    core::{LanguageIndex, ReloadReport},
};

/// Configuration and a freshly loaded index for one command run.
pub struct LoadedIndex {
    pub workspace: Workspace,
    pub index: LanguageIndex,
    pub report: ReloadReport,
}

impl LoadedIndex {
    pub fn finish(self, summary: CommandSummary, found: bool) -> CommandResult {
        CommandResult {
            summary,
            found,
            diagnostics: self.report.diagnostics,
            skipped_paths: self.report.skipped_paths,
        }
    }
}

/// Resolve configuration (CLI > config file > defaults) and load every
/// language file under the language folder.
pub fn load_index(common: &CommonArgs) -> Result<LoadedIndex> {
    let workspace = Workspace::load(&common.root, &common.overrides())?;

    if common.verbose && !workspace.from_file {
        eprintln!("Note: No {CONFIG_FILE_NAME} found, using default configuration");
    }

    let index = LanguageIndex::new();
    let report = index.reload_from_disk(&workspace.settings, &workspace.config.ignores)?;

    Ok(LoadedIndex {
        workspace,
        index,
        report,
    })
}
