use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_stats_reports_counts_and_files() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["stats"])?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        output.stdout,
        "✓ Indexed 2 of 2 language files from bot/lang\n\
         \x20 generation:  1\n\
         \x20 languages:   2\n\
         \x20 unique keys: 4\n\
         \x20 entries:     6\n\
         \x20 parsed:      2 strict, 0 tolerant, 0 failed\n\
         \n\
         \x20 de  de.yml  strict   3 entries\n\
         \x20 en  en.yml  strict   3 entries\n"
    );
    assert_eq!(output.stderr, "");

    Ok(())
}

#[test]
fn test_stats_warns_about_unusable_file() -> Result<()> {
    let test = CliTest::with_bot_languages()?;
    test.write_file("bot/lang/fr.yml", "{{{\n")?;

    let output = test.run(&["stats"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("parsed:      2 strict, 0 tolerant, 1 failed"));
    insta::assert_snapshot!(
        output.stderr.trim_end(),
        @"warning: 1 language file(s) could not be loaded (use -v for details)"
    );

    Ok(())
}

#[test]
fn test_stats_verbose_lists_diagnostics() -> Result<()> {
    let test = CliTest::with_bot_languages()?;
    test.write_file("bot/lang/fr.yml", "{{{\n")?;

    let output = test.run(&["stats", "-v"])?;
    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stderr
            .contains("Note: No .langdexrc.json found, using default configuration")
    );
    assert!(
        output
            .stderr
            .contains("warning: bot/lang/fr.yml: parsed with tolerant parser (invalid YAML")
    );
    assert!(
        output
            .stderr
            .contains("warning: bot/lang/fr.yml: no entries found")
    );

    Ok(())
}

#[test]
fn test_missing_language_folder_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["stats"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error: Language folder not found"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_bot_languages()?;
    test.write_file(".langdexrc.json", r#"{ "ignores": ["drafts/[*"] }"#)?;

    let output = test.run(&["keys"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_languages_in_load_order() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["languages"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "de  3 keys, 1 file\nen  3 keys, 1 file\n");

    Ok(())
}

#[test]
fn test_keys_with_prefix() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["keys", "--prefix", "general."])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "general.ok\ngeneral.only_de\n");

    let output = test.run(&["keys"])?;
    assert_eq!(output.stdout.lines().count(), 4);

    Ok(())
}

#[test]
fn test_keys_from_configured_folder() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".langdexrc.json",
        r#"{ "languageFolderPath": "locales", "ignores": ["drafts"] }"#,
    )?;
    test.write_file("locales/en.yml", "a: A\n")?;
    test.write_file("locales/drafts/en.yml", "draft: D\n")?;

    let output = test.run(&["keys"])?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "a\n");

    Ok(())
}

#[test]
fn test_lang_dir_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_bot_languages()?;
    test.write_file("other/en.yml", "elsewhere: Here\n")?;

    let output = test.run(&["keys", "--lang-dir", "other"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "elsewhere\n");

    Ok(())
}

#[test]
fn test_complete_offers_file_and_general_keys() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["complete", "--file", "moderation"])?;
    assert_eq!(output.code, Some(0));
    let inserted: Vec<&str> = output
        .stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        inserted,
        vec!["ban.success", "general.ok", "general.only_de", "kick"]
    );

    let output = test.run(&["complete", "ki", "--file", "moderation"])?;
    insta::assert_snapshot!(output.stdout.trim_end(), @"kick  Kicked");

    Ok(())
}

#[test]
fn test_overview_marks_missing_translations() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["overview", "moderation"])?;
    assert_eq!(output.code, Some(0));

    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines[0], "moderation (2 languages)");
    assert_eq!(lines[1], "  file keys:");
    assert_eq!(columns(lines[2]), vec!["moderation.ban.success", "2/2"]);
    assert_eq!(columns(lines[3]), vec!["moderation.kick", "1/2", "✘"]);
    assert_eq!(lines[4], "  general keys:");
    assert_eq!(columns(lines[5]), vec!["general.ok", "2/2"]);
    assert_eq!(columns(lines[6]), vec!["general.only_de", "1/2", "✘"]);

    Ok(())
}

fn columns(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
