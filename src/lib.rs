//! Langdex - index and resolver for YAML localization files
//!
//! Langdex loads a folder of YAML language files (`en.yml`, `messages_de.yaml`,
//! `fr/commands.yml`, ...) into a flat, per-language key index. Files that a
//! strict YAML parser rejects are still read with a line-based tolerant parser,
//! so one broken file never hides the rest of a language.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and report output)
//! - `config`: Configuration file loading and CLI overrides
//! - `core`: Parsers, language inference, candidate keys and the `LanguageIndex`
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;
