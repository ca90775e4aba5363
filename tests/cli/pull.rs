use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_pull_from_empty_provider_is_up_to_date() -> Result<()> {
    let test = CliTest::with_null_provider("remote")?;
    test.write_file("translations/messages.en.json", r#"{"hello": "Hello"}"#)?;

    let output = test.command().args(["pull", "remote"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Local translations are already up to date with \"remote\"\n"
    );
    // Nothing pulled, nothing rewritten.
    assert_eq!(
        test.read_file("translations/messages.en.json")?,
        r#"{"hello": "Hello"}"#
    );

    Ok(())
}

#[test]
fn test_force_pull_from_empty_provider_keeps_files() -> Result<()> {
    let test = CliTest::with_null_provider("remote")?;
    test.write_file("translations/messages.fr.json", r#"{"hello": "Bonjour"}"#)?;

    let output = test.command().args(["pull", "remote", "--force"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("translations/messages.fr.json").exists());

    Ok(())
}

#[test]
fn test_pull_from_unknown_provider() -> Result<()> {
    let test = CliTest::with_null_provider("remote")?;

    let output = test.command().args(["pull", "missing"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("\u{2718} error:"), "stderr: {}", err);
    assert!(err.contains("Failed to pull translations from \"missing\""));
    assert!(err.contains("Unknown provider \"missing\""));

    Ok(())
}

#[test]
fn test_pull_rejects_unsupported_scheme() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".transyncrc.json",
        r#"{"providers": {"remote": {"dsn": "acme://key@default"}}}"#,
    )?;

    let output = test.command().args(["pull", "remote"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("acme"), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_pull_rejects_invalid_dsn_in_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".transyncrc.json",
        r#"{"providers": {"remote": {"dsn": "not a dsn"}}}"#,
    )?;

    let output = test.command().args(["pull", "remote"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid DSN for provider 'remote'"));

    Ok(())
}
