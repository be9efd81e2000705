//! Report formatting and printing utilities.
//!
//! Command results are computed in `commands` and rendered here, so the core
//! can be used as a library without any terminal output.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CandidatesSummary, CommandResult, CommandSummary, InitSummary, LanguageSummary,
    LocateSummary, LookupSummary, ResolveSummary, StatsSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{
    Completion, KeyOverview, KeyRow, ReloadDiagnostic, ResolvedTranslation, UNTRANSLATED_MARKER,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result: output to stdout, load warnings to stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    print_summary_to(&result.summary, &mut io::stdout().lock());
    print_load_warnings_to(
        &result.diagnostics,
        result.skipped_paths,
        verbose,
        &mut io::stderr().lock(),
    );
}

/// Print the output of a command to a custom writer.
pub fn print_summary_to<W: Write>(summary: &CommandSummary, writer: &mut W) {
    match summary {
        CommandSummary::Stats(summary) => print_stats(summary, writer),
        CommandSummary::Languages(languages) => print_languages(languages, writer),
        CommandSummary::Keys(keys) => print_keys(keys, writer),
        CommandSummary::Resolve(summary) => print_resolve(summary, writer),
        CommandSummary::Locate(summary) => print_locate(summary, writer),
        CommandSummary::Candidates(summary) => print_candidates(summary, writer),
        CommandSummary::Lookup(summary) => print_lookup(summary, writer),
        CommandSummary::Complete(completions) => print_completions(completions, writer),
        CommandSummary::Overview(overview) => print_overview(overview, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

/// Print warnings collected while loading the index.
///
/// Without `verbose` only files that contributed nothing are counted;
/// tolerant fallbacks are listed in verbose mode only.
pub fn print_load_warnings_to<W: Write>(
    diagnostics: &[ReloadDiagnostic],
    skipped_paths: usize,
    verbose: bool,
    writer: &mut W,
) {
    if skipped_paths > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) skipped due to access errors",
            "warning:".bold().yellow(),
            skipped_paths
        );
    }

    if verbose {
        for diagnostic in diagnostics {
            let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), diagnostic);
        }
        return;
    }

    let unusable = diagnostics
        .iter()
        .filter(|d| !matches!(d, ReloadDiagnostic::TolerantFallback { .. }))
        .count();
    if unusable > 0 {
        let _ = writeln!(
            writer,
            "{} {} language file(s) could not be loaded (use {} for details)",
            "warning:".bold().yellow(),
            unusable,
            "-v".cyan()
        );
    }
}

fn print_stats<W: Write>(summary: &StatsSummary, writer: &mut W) {
    let stats = &summary.stats;
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Indexed {} of {} language {} from {}",
            stats.loaded_file_count,
            stats.file_count,
            plural(stats.file_count, "file", "files"),
            summary.language_folder.display()
        )
        .green()
    );
    let _ = writeln!(writer, "  generation:  {}", summary.generation);
    let _ = writeln!(writer, "  languages:   {}", stats.language_count);
    let _ = writeln!(writer, "  unique keys: {}", stats.unique_key_count);
    let _ = writeln!(writer, "  entries:     {}", stats.total_entry_count);
    let _ = writeln!(
        writer,
        "  parsed:      {} strict, {} tolerant, {} failed",
        stats.strict_parse_count, stats.tolerant_parse_count, stats.failed_parse_count
    );

    if summary.files.is_empty() {
        return;
    }
    let _ = writeln!(writer);

    let paths: Vec<String> = summary
        .files
        .iter()
        .map(|file| display_relative(&file.file_path, &summary.language_folder))
        .collect();
    let path_width = max_width(paths.iter().map(String::as_str));
    let language_width = max_width(summary.files.iter().map(|f| f.language.as_str()));

    for (file, path) in summary.files.iter().zip(&paths) {
        let outcome = format!("{:?}", file.outcome).to_lowercase();
        let _ = writeln!(
            writer,
            "  {}  {}  {:<8} {} {}",
            pad(file.language.as_str(), language_width).cyan(),
            pad(path, path_width),
            outcome,
            file.entry_count,
            plural(file.entry_count, "entry", "entries")
        );
    }
}

fn print_languages<W: Write>(languages: &[LanguageSummary], writer: &mut W) {
    if languages.is_empty() {
        let _ = writeln!(writer, "{}", "No languages loaded".yellow());
        return;
    }
    let width = max_width(languages.iter().map(|l| l.language.as_str()));
    for language in languages {
        let _ = writeln!(
            writer,
            "{}  {} {}, {} {}",
            pad(language.language.as_str(), width).cyan(),
            language.key_count,
            plural(language.key_count, "key", "keys"),
            language.file_count,
            plural(language.file_count, "file", "files")
        );
    }
}

fn print_keys<W: Write>(keys: &[String], writer: &mut W) {
    if keys.is_empty() {
        let _ = writeln!(writer, "{}", "No keys found".yellow());
        return;
    }
    for key in keys {
        let _ = writeln!(writer, "{key}");
    }
}

fn print_resolve<W: Write>(summary: &ResolveSummary, writer: &mut W) {
    match &summary.translation {
        Some(translation) => print_translation(translation, writer),
        None => {
            let _ = writeln!(
                writer,
                "{} No translation found for \"{}\"",
                FAILURE_MARK.red(),
                summary.query
            );
            if summary.candidates.len() > 1 {
                let _ = writeln!(writer, "  tried: {}", summary.candidates.join(", "));
            }
        }
    }

    if let Some(all) = &summary.all_languages {
        let width = max_width(all.keys().map(|l| l.as_str()));
        for (language, value) in all {
            let _ = writeln!(writer, "  {}  {}", pad(language.as_str(), width).cyan(), value);
        }
    }
}

fn print_translation<W: Write>(translation: &ResolvedTranslation, writer: &mut W) {
    let source = if translation.from_default {
        translation.language.to_string()
    } else {
        format!("{}, not in default language", translation.language)
    };
    let _ = writeln!(
        writer,
        "{} [{}]: {}",
        translation.key.bold(),
        source,
        translation.value
    );
}

fn print_locate<W: Write>(summary: &LocateSummary, writer: &mut W) {
    match &summary.location {
        // Editors expect 1-based positions.
        Some(location) => {
            let _ = writeln!(
                writer,
                "{}: {}:{}:{}",
                summary.key.bold(),
                location.file_path,
                location.line + 1,
                location.col + 1
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "{} Key \"{}\" is not defined in any language",
                FAILURE_MARK.red(),
                summary.key
            );
        }
    }
}

fn print_candidates<W: Write>(summary: &CandidatesSummary, writer: &mut W) {
    for candidate in &summary.candidates {
        let _ = writeln!(writer, "{candidate}");
    }
}

fn print_lookup<W: Write>(summary: &LookupSummary, writer: &mut W) {
    let Some(string) = &summary.string else {
        let _ = writeln!(
            writer,
            "{} No string literal at {}:{}:{}",
            FAILURE_MARK.red(),
            summary.file.display(),
            summary.line,
            summary.column
        );
        return;
    };

    if summary.references.is_empty() {
        let _ = writeln!(
            writer,
            "{} \"{}\" contains no key reference",
            FAILURE_MARK.red(),
            string.value
        );
        return;
    }

    let width = max_width(summary.references.iter().map(|(key, _)| key.as_str()));
    for (key, translation) in &summary.references {
        match translation {
            Some(translation) => {
                let _ = writeln!(
                    writer,
                    "{}  {} [{}]: {}",
                    pad(key, width).bold(),
                    translation.key,
                    translation.language,
                    translation.value
                );
            }
            None => {
                let _ = writeln!(
                    writer,
                    "{}  {}",
                    pad(key, width).bold(),
                    UNTRANSLATED_MARKER.yellow()
                );
            }
        }
    }
}

fn print_completions<W: Write>(completions: &[Completion], writer: &mut W) {
    let width = max_width(completions.iter().map(|c| c.insert_text.as_str()));
    for completion in completions {
        let _ = writeln!(
            writer,
            "{}  {}",
            pad(&completion.insert_text, width),
            completion.detail().dimmed()
        );
    }
}

fn print_overview<W: Write>(overview: &KeyOverview, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} ({} {})",
        overview.file_stem.bold(),
        overview.languages_total,
        plural(overview.languages_total, "language", "languages")
    );

    let width = max_width(
        overview
            .base_keys
            .iter()
            .chain(&overview.general_keys)
            .map(|row| row.key.as_str()),
    );
    print_key_rows("file keys", &overview.base_keys, overview.languages_total, width, writer);
    print_key_rows("general keys", &overview.general_keys, overview.languages_total, width, writer);
}

fn print_key_rows<W: Write>(
    title: &str,
    rows: &[KeyRow],
    languages_total: usize,
    width: usize,
    writer: &mut W,
) {
    let _ = writeln!(writer, "  {title}:");
    if rows.is_empty() {
        let _ = writeln!(writer, "    {}", "none".dimmed());
        return;
    }
    for row in rows {
        let coverage = format!("{}/{}", row.translations, languages_total);
        if row.has_missing_translations {
            let _ = writeln!(
                writer,
                "    {}  {} {}",
                pad(&row.key, width),
                coverage.yellow(),
                FAILURE_MARK.red()
            );
        } else {
            let _ = writeln!(writer, "    {}  {}", pad(&row.key, width), coverage.green());
        }
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn max_width<'a>(items: impl Iterator<Item = &'a str>) -> usize {
    items.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Left-align `text` to a display width.
fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(padding))
}

fn display_relative(file_path: &str, root: &Path) -> String {
    Path::new(file_path)
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}
