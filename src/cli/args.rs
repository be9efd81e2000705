//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `stats`: Index statistics and parse outcomes
//! - `languages`: Loaded languages with key counts
//! - `keys`: List every key, optionally filtered by prefix
//! - `resolve`: Resolve a key through the default/fallback chain
//! - `locate`: Find where a key is defined
//! - `candidates`: Show the qualified keys tried for a short reference
//! - `lookup`: Resolve the key references in a Python string literal
//! - `complete`: Completion proposals for a partially typed key
//! - `overview`: Translation coverage of a source file's keys
//! - `init`: Initialize langdex configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::{config::ConfigOverrides, core::ScopeContext};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by all commands that load the index.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory, where the config file is searched from
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Language folder path (overrides config file)
    #[arg(long)]
    pub lang_dir: Option<PathBuf>,

    /// Default language (overrides config file)
    #[arg(long, env = "LANGDEX_DEFAULT_LANGUAGE")]
    pub default_language: Option<String>,

    /// Fallback language (overrides config file)
    #[arg(long, env = "LANGDEX_FALLBACK_LANGUAGE")]
    pub fallback_language: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            language_folder: self.lang_dir.clone(),
            default_language: self.default_language.clone(),
            fallback_language: self.fallback_language.clone(),
        }
    }
}

/// Where the key reference was found in the calling source.
#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    /// File stem of the calling source file (e.g. `moderation`)
    #[arg(long)]
    pub file: Option<String>,

    /// Enclosing class name
    #[arg(long)]
    pub class: Option<String>,

    /// Enclosing function name
    #[arg(long)]
    pub function: Option<String>,
}

impl ScopeArgs {
    pub fn scope(&self) -> ScopeContext {
        ScopeContext::new(
            self.file.as_deref(),
            self.class.as_deref(),
            self.function.as_deref(),
        )
    }
}

#[derive(Debug, Args)]
pub struct IndexCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Only list keys starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Dotted key, or a short reference when scope flags are given
    pub key: String,
    /// Show the value in every language instead of the resolution chain
    #[arg(long)]
    pub all: bool,
    #[command(flatten)]
    pub scope: ScopeArgs,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LocateCommand {
    pub key: String,
    /// Preferred language; falls back to default, fallback, then any language
    #[arg(long)]
    pub language: Option<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CandidatesCommand {
    pub key: String,
    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Python source file
    pub file: PathBuf,
    /// Line number (1-based)
    #[arg(long)]
    pub line: usize,
    /// Column number (1-based)
    #[arg(long)]
    pub column: usize,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CompleteCommand {
    /// Text typed so far
    #[arg(default_value = "")]
    pub prefix: String,
    /// File stem of the source file being edited
    #[arg(long)]
    pub file: Option<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct OverviewCommand {
    /// File stem of the source file (e.g. `moderation`)
    pub file_stem: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show index statistics and parse outcomes
    Stats(IndexCommand),
    /// List loaded languages
    Languages(IndexCommand),
    /// List all translation keys
    Keys(KeysCommand),
    /// Resolve a key through the default and fallback languages
    Resolve(ResolveCommand),
    /// Find where a key is defined
    Locate(LocateCommand),
    /// Show the qualified keys tried for a short key reference
    Candidates(CandidatesCommand),
    /// Resolve the key references in a Python string literal
    Lookup(LookupCommand),
    /// Suggest keys for a partially typed reference
    Complete(CompleteCommand),
    /// Show translation coverage for a source file's keys
    Overview(OverviewCommand),
    /// Initialize a new .langdexrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Stats(cmd) | Command::Languages(cmd) => Some(&cmd.common),
            Command::Keys(cmd) => Some(&cmd.common),
            Command::Resolve(cmd) => Some(&cmd.common),
            Command::Locate(cmd) => Some(&cmd.common),
            Command::Lookup(cmd) => Some(&cmd.common),
            Command::Complete(cmd) => Some(&cmd.common),
            Command::Overview(cmd) => Some(&cmd.common),
            Command::Candidates(_) | Command::Init | Command::Serve => None,
        }
    }
}
