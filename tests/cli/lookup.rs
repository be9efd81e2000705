use anyhow::Result;

use crate::CliTest;

const COG: &str = r#"class Moderation(commands.Cog):
    async def ban(self, ctx, user):
        await ctx.respond(t("success", user=user))
        await ctx.respond(t("missing_key"))
"#;

fn with_cog() -> Result<CliTest> {
    let test = CliTest::with_bot_languages()?;
    test.write_file("cogs/moderation.py", COG)?;
    Ok(test)
}

#[test]
fn test_lookup_resolves_string_under_cursor() -> Result<()> {
    let test = with_cog()?;

    let output = test.run(&["lookup", "cogs/moderation.py", "--line", "3", "--column", "30"])?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @"success  moderation.ban.success [en]: Banned {user}"
    );

    Ok(())
}

#[test]
fn test_lookup_unresolved_reference_fails() -> Result<()> {
    let test = with_cog()?;

    let output = test.run(&["lookup", "cogs/moderation.py", "--line", "4", "--column", "30"])?;
    assert_eq!(output.code, Some(1));
    insta::assert_snapshot!(output.stdout.trim_end(), @"missing_key  ⚠️ Not translated");

    Ok(())
}

#[test]
fn test_lookup_outside_string_fails() -> Result<()> {
    let test = with_cog()?;

    let output = test.run(&["lookup", "cogs/moderation.py", "--line", "3", "--column", "1"])?;
    assert_eq!(output.code, Some(1));
    insta::assert_snapshot!(
        output.stdout.trim_end(),
        @"✘ No string literal at cogs/moderation.py:3:1"
    );

    Ok(())
}

#[test]
fn test_lookup_missing_source_file_is_an_error() -> Result<()> {
    let test = with_cog()?;

    let output = test.run(&["lookup", "cogs/nope.py", "--line", "1", "--column", "1"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read source file"));

    Ok(())
}
