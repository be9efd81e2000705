use anyhow::Result;

use super::{CommandResult, CommandSummary, LocateSummary, helper::load_index};
use crate::cli::args::LocateCommand;

pub fn locate(cmd: LocateCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let key = cmd.key.trim().to_string();

    let location = loaded.index.locate_preferred(
        cmd.language.as_deref(),
        &key,
        &loaded.workspace.settings,
    );

    let found = location.is_some();
    Ok(loaded.finish(
        CommandSummary::Locate(LocateSummary { key, location }),
        found,
    ))
}
