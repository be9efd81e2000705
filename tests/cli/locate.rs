use anyhow::Result;

use crate::CliTest;

#[test]
fn test_locate_prefers_default_language() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["locate", "moderation.ban.success"])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @"moderation.ban.success: bot/lang/en.yml:3:5"
    );

    Ok(())
}

#[test]
fn test_locate_requested_language() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["locate", "moderation.ban.success", "--language", "DE"])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @"moderation.ban.success: bot/lang/de.yml:3:5"
    );

    Ok(())
}

#[test]
fn test_locate_falls_back_to_any_language() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["locate", "general.only_de", "--language", "fr"])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(output.stdout.trim_end(), @"general.only_de: bot/lang/de.yml:6:3");

    Ok(())
}

#[test]
fn test_locate_missing_key_fails() -> Result<()> {
    let test = CliTest::with_bot_languages()?;

    let output = test.run(&["locate", "nope"])?;
    assert_eq!(output.code, Some(1));
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @r#"✘ Key "nope" is not defined in any language"#
    );

    Ok(())
}
