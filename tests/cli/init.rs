use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(output.stdout.trim_end(), @"✓ Created .langdexrc.json");

    let content = test.read_file(".langdexrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["languageFolderPath"], "bot/lang");
    assert_eq!(parsed["defaultLanguage"], "en");
    assert_eq!(parsed["fallbackLanguage"], "en");
    assert!(parsed["ignores"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".langdexrc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.code, Some(1));
    insta::assert_snapshot!(output.stderr.trim_end(), @"Error: .langdexrc.json already exists");
    assert_eq!(test.read_file(".langdexrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("bot/lang/en.yml", "hello: Hello\n")?;

    let output = test.run(&["resolve", "hello"])?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    insta::assert_snapshot!(output.stdout.trim_end(), @"hello [en]: Hello");

    Ok(())
}
