use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_resolve_from_default_language() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["resolve", "moderation.kick"])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(output.stdout.trim_end(), @"moderation.kick [en]: Kicked");

    Ok(())
}

#[test]
fn test_resolve_from_other_language() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["resolve", "general.only_de"])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @"general.only_de [de, not in default language]: Nur Deutsch"
    );

    Ok(())
}

#[test]
fn test_resolve_default_language_from_env() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test
        .command()
        .args(["resolve", "general.ok"])
        .env("LANGDEX_DEFAULT_LANGUAGE", "DE")
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "general.ok [de]: Okay\n");

    Ok(())
}

#[test]
fn test_resolve_missing_key_fails() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["resolve", "missing"])?;
    assert_eq!(output.code, Some(1));
    insta::assert_snapshot!(output.stdout.trim_end(), @r#"✘ No translation found for "missing""#);

    Ok(())
}

#[test]
fn test_resolve_short_key_in_scope() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&[
        "resolve",
        "success",
        "--file",
        "moderation",
        "--class",
        "Moderation",
        "--function",
        "ban",
    ])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @"moderation.ban.success [en]: Banned {user}"
    );

    Ok(())
}

#[test]
fn test_resolve_short_key_lists_tried_candidates() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["resolve", "nope", "--file", "moderation"])?;
    assert_eq!(output.code, Some(1));
    assert_eq!(
        output.stdout,
        "✘ No translation found for \"nope\"\n  \
         tried: moderation.nope, moderation.general.nope, general.nope, nope\n"
    );

    Ok(())
}

#[test]
fn test_resolve_all_languages() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["resolve", "moderation.ban.success", "--all"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "moderation.ban.success [en]: Banned {user}\n  de  Gebannt {user}\n  en  Banned {user}\n"
    );

    Ok(())
}

#[test]
fn test_candidates_full_scope() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[
        "candidates",
        "success",
        "--file",
        "moderation",
        "--class",
        "Moderation",
        "--function",
        "ban",
    ])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout.lines().collect::<Vec<_>>(),
        vec![
            "moderation.Moderation.ban.success",
            "moderation.Moderation.success",
            "moderation.ban.success",
            "moderation.success",
            "moderation.general.success",
            "general.success",
            "success",
        ]
    );

    Ok(())
}

#[test]
fn test_candidates_dotted_key_is_qualified() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["candidates", "general.ok", "--file", "moderation"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "general.ok\n");

    Ok(())
}
