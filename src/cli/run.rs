use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        init::init,
        locate::locate,
        query::{complete, keys, languages, overview, stats},
        resolve::{candidates, lookup, resolve},
    },
};

/// Dispatch to the command handler; `serve` is handled by the binary.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Stats(cmd)) => stats(cmd),
        Some(Command::Languages(cmd)) => languages(cmd),
        Some(Command::Keys(cmd)) => keys(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Locate(cmd)) => locate(cmd),
        Some(Command::Candidates(cmd)) => candidates(cmd),
        Some(Command::Lookup(cmd)) => lookup(cmd),
        Some(Command::Complete(cmd)) => complete(cmd),
        Some(Command::Overview(cmd)) => overview(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => bail!("Serve command should be handled before run()"),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
