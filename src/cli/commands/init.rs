use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

/// Write the default config into `dir` unless one already exists there.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let created = !config_path.exists();

    if created {
        fs::write(&config_path, default_config_json()?)?;
    }

    Ok(CommandResult::standalone(
        CommandSummary::Init(InitSummary { created }),
        created,
    ))
}
