use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_push_local_messages() -> Result<()> {
    let test = CliTest::with_null_provider("remote")?;
    test.write_file(
        "translations/messages.en.json",
        r#"{"hello": "Hello", "Common": {"save": "Save"}}"#,
    )?;
    test.write_file("translations/messages.fr.json", r#"{"hello": "Bonjour"}"#)?;

    let output = test.command().arg("push").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Pushed 3 messages to \"remote\" (locales: en, fr; domains: messages)\n"
    );

    Ok(())
}

#[test]
fn test_push_limited_to_locale() -> Result<()> {
    let test = CliTest::with_null_provider("remote")?;
    test.write_file("translations/messages.en.json", r#"{"hello": "Hello"}"#)?;
    test.write_file("translations/messages.fr.json", r#"{"hello": "Bonjour"}"#)?;

    let output = test
        .command()
        .args(["push", "remote", "--locales", "fr"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Pushed 1 message to \"remote\" (locales: fr; domains: messages)\n"
    );

    Ok(())
}

#[test]
fn test_push_to_unknown_provider() -> Result<()> {
    let test = CliTest::with_null_provider("remote")?;
    test.write_file("translations/messages.en.json", r#"{"hello": "Hello"}"#)?;

    let output = test.command().args(["push", "other"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown provider \"other\""));

    Ok(())
}
