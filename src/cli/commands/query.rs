//! Commands that list what the index holds.

use anyhow::Result;

use super::{
    CommandResult, CommandSummary, LanguageSummary, StatsSummary,
    helper::load_index,
};
use crate::cli::args::{CompleteCommand, IndexCommand, KeysCommand, OverviewCommand};

pub fn stats(cmd: IndexCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let snapshot = loaded.index.snapshot();

    let summary = StatsSummary {
        language_folder: loaded.workspace.settings.root.clone(),
        generation: snapshot.generation(),
        stats: snapshot.stats(),
        files: snapshot.files().to_vec(),
    };
    Ok(loaded.finish(CommandSummary::Stats(summary), true))
}

pub fn languages(cmd: IndexCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let snapshot = loaded.index.snapshot();

    let languages = snapshot
        .languages()
        .into_iter()
        .map(|language| LanguageSummary {
            key_count: snapshot
                .table(language.as_str())
                .map_or(0, |table| table.len()),
            file_count: snapshot
                .files()
                .iter()
                .filter(|file| file.language == language)
                .count(),
            language,
        })
        .collect();

    Ok(loaded.finish(CommandSummary::Languages(languages), true))
}

pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let prefix = cmd.prefix.as_deref().unwrap_or("");

    let keys = loaded
        .index
        .all_keys()
        .into_iter()
        .filter(|key| key.starts_with(prefix))
        .collect();

    Ok(loaded.finish(CommandSummary::Keys(keys), true))
}

pub fn complete(cmd: CompleteCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let completions = loaded.index.completions(
        &cmd.prefix,
        cmd.file.as_deref(),
        &loaded.workspace.settings,
    );
    Ok(loaded.finish(CommandSummary::Complete(completions), true))
}

pub fn overview(cmd: OverviewCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let overview = loaded.index.key_overview(cmd.file_stem.trim());
    Ok(loaded.finish(CommandSummary::Overview(overview), true))
}
