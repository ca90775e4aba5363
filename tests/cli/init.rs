use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} Created .transyncrc.json\n");

    let content = test.read_file(".transyncrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["defaultLocale"], "en");
    assert_eq!(parsed["enabledLocales"], serde_json::json!(["en"]));
    assert_eq!(parsed["translationsDir"], "./translations");
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".transyncrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .transyncrc.json already exists\n");
    assert_eq!(test.read_file(".transyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("translations/messages.en.json", r#"{"hello": "Hello"}"#)?;

    // No providers yet, so push refuses but the config itself loads.
    let output = test.command().arg("push").output()?;
    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        stderr(&output)
    );
    assert!(stderr(&output).contains("no provider is configured"));

    Ok(())
}
