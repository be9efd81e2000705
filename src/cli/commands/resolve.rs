//! Commands that turn a key reference into a translation.

use std::fs;

use anyhow::{Context, Result};

use super::{
    CandidatesSummary, CommandResult, CommandSummary, LookupSummary, ResolveSummary,
    helper::load_index,
};
use crate::{
    cli::args::{CandidatesCommand, LookupCommand, ResolveCommand},
    core::{
        ScopeContext, candidate_keys,
        python::{find_keys_in_string, string_at},
    },
};

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let loaded = load_index(&cmd.common)?;
    let settings = &loaded.workspace.settings;
    let scope = cmd.scope.scope();
    let key = cmd.key.trim();

    let (candidates, translation) = if scope == ScopeContext::default() {
        (vec![key.to_string()], loaded.index.resolve(key, settings))
    } else {
        (
            candidate_keys(key, &scope),
            loaded.index.resolve_in_context(key, &scope, settings),
        )
    };

    let all_languages = cmd.all.then(|| {
        let resolved_key = translation.as_ref().map_or(key, |t| t.key.as_str());
        loaded.index.resolve_all_languages(resolved_key)
    });

    let found = translation.is_some();
    let summary = ResolveSummary {
        query: key.to_string(),
        candidates,
        translation,
        all_languages,
    };
    Ok(loaded.finish(CommandSummary::Resolve(summary), found))
}

pub fn candidates(cmd: CandidatesCommand) -> Result<CommandResult> {
    let scope = cmd.scope.scope();
    let candidates = candidate_keys(&cmd.key, &scope);
    let found = !candidates.is_empty();

    Ok(CommandResult::standalone(
        CommandSummary::Candidates(CandidatesSummary {
            key: cmd.key,
            scope,
            candidates,
        }),
        found,
    ))
}

/// Resolve the key references of the string literal at a 1-based position.
pub fn lookup(cmd: LookupCommand) -> Result<CommandResult> {
    let source = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read source file: {}", cmd.file.display()))?;
    let line = cmd.line.saturating_sub(1);
    let column = cmd.column.saturating_sub(1);

    let loaded = load_index(&cmd.common)?;
    let settings = &loaded.workspace.settings;
    let scope = ScopeContext::at(&cmd.file, &source, line);
    let string = string_at(&source, line, column);

    let references: Vec<_> = string
        .as_ref()
        .map(|s| find_keys_in_string(&s.value))
        .unwrap_or_default()
        .into_iter()
        .map(|key| {
            let translation = loaded.index.resolve_in_context(&key, &scope, settings);
            (key, translation)
        })
        .collect();

    let found = references.iter().any(|(_, t)| t.is_some());
    let summary = LookupSummary {
        file: cmd.file,
        line: cmd.line,
        column: cmd.column,
        scope,
        string,
        references,
    };
    Ok(loaded.finish(CommandSummary::Lookup(summary), found))
}
