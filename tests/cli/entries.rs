use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, case, localisable_enum, message_enum, stderr, stdout};

fn write_project(test: &CliTest) -> Result<()> {
    test.write_export("Exports/Login.json", json!([message_enum()]))?;
    test.write_export(
        "Exports/Menu/Title.json",
        json!([localisable_enum("Title", json!([case("home")]))]),
    )?;
    Ok(())
}

#[test]
fn test_entries_text() -> Result<()> {
    let test = CliTest::new()?;
    write_project(&test)?;

    assert_cmd_snapshot!(test.entries_command().arg("Exports"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Message.welcome             Login.json
    Message.greeting(name: %@)  Login.json
    Title.home                  Menu/Title.json

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_entries_json() -> Result<()> {
    let test = CliTest::new()?;
    write_project(&test)?;

    let output = test
        .entries_command()
        .args(["Exports", "--format", "json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let records: Value = serde_json::from_str(&stdout(&output))?;
    let records = records.as_array().expect("entries are a JSON array");
    assert_eq!(records.len(), 3);

    let greeting = &records[1];
    assert_eq!(greeting["identifier"], "Message.greeting(name: %@)");
    assert_eq!(greeting["unit"], "Login.json");
    assert_eq!(greeting["name"], "Message.greeting");
    assert_eq!(greeting["parameters"][0]["label"], "name");

    assert_eq!(records[2]["identifier"], "Title.home");
    assert_eq!(records[2]["parameters"], json!([]));

    Ok(())
}

#[test]
fn test_entries_exclude() -> Result<()> {
    let test = CliTest::new()?;
    write_project(&test)?;

    let output = test
        .entries_command()
        .args(["Exports", "--exclude", "Menu"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listed = stdout(&output);
    assert!(listed.contains("Message.welcome"));
    assert!(!listed.contains("Title.home"));

    Ok(())
}

#[test]
fn test_entries_with_unparseable_export() -> Result<()> {
    let test = CliTest::new()?;
    write_project(&test)?;
    test.write_file("Exports/Broken.json", "{ \"key.substructure\": [")?;

    let output = test.entries_command().arg("Exports").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("parse-error"), "stderr: {}", err);
    assert!(err.contains("Broken.json"), "stderr: {}", err);

    Ok(())
}
