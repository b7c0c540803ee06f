use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .quillrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".quillrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["markerInterface"], "LocalisableString");
    assert_eq!(
        parsed["shortenedInfixes"],
        serde_json::json!(["ViewController.", "String."])
    );
    assert_eq!(parsed["exportExtension"], "json");
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".quillrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: .quillrc.json already exists
    ");

    assert_eq!(test.read_file(".quillrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_export("Exports/Login.json", serde_json::json!([crate::message_enum()]))?;

    let output = test.entries_command().arg("Exports").output()?;
    assert!(
        output.status.success(),
        "entries should work with the initialized config. stderr: {}",
        crate::stderr(&output)
    );

    Ok(())
}
