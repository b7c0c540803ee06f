use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, case, localisable_enum, message_enum, parameter, stderr, stdout};

const BANNER: &str = "// This file has been generated by quill. Do not edit this file manually.";
const TABLE_BANNER: &str =
    "/* This file has been generated by quill. Do not edit this file manually. */";

const MESSAGE_CONFORMANCE: &str = concat!(
    "extension Message {\n",
    "\tvar identifier: String {\n",
    "\t\tswitch self {\n",
    "\t\t\tcase .welcome:\treturn \"Message.welcome\"\n",
    "\t\t\tcase .greeting:\treturn \"Message.greeting(name: %@)\"\n",
    "\t\t}\n",
    "\t}\n",
    "\n",
    "\tvar arguments: [CVarArg] {\n",
    "\t\tswitch self {\n",
    "\t\t\tcase .welcome:\treturn []\n",
    "\t\t\tcase .greeting(name: let name):\treturn [name]\n",
    "\t\t}\n",
    "\t}\n",
    "}\n",
);

#[test]
fn test_generate_single_file_and_table() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;

    let output = test
        .generate_command()
        .args(["Exports", "-o", "Generated/Strings.swift"])
        .args(["-l", "en.lproj/Localizable.strings"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Generated 1 conformance with 2 entries from 1 unit"));

    let source = test.read_file("Generated/Strings.swift")?;
    assert!(source.starts_with(&format!("{}\n\nimport Foundation\nimport os\n\n", BANNER)));
    assert!(source.contains("protocol LocalisableString {"));
    assert!(source.contains("table: \"Localizable\")"));
    assert!(source.ends_with(&format!("}}\n\n{}", MESSAGE_CONFORMANCE)));

    assert_eq!(
        test.read_file("en.lproj/Localizable.strings")?,
        format!(
            concat!(
                "{}\n\n",
                "\"Message.greeting(name: %@)\" = \"\";\n\n",
                "\"Message.welcome\" = \"\";\n\n",
            ),
            TABLE_BANNER
        )
    );

    Ok(())
}

#[test]
fn test_generate_directory_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;

    let output = test
        .generate_command()
        .args(["Exports", "-o", "Generated"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let protocol = test.read_file("Generated/LocalisableString.swift")?;
    assert!(protocol.starts_with(BANNER));
    assert!(protocol.contains("protocol LocalisableString {"));
    assert!(!protocol.contains("extension Message"));

    assert_eq!(
        test.read_file("Generated/Message.quill.swift")?,
        format!("{}\n\n{}", BANNER, MESSAGE_CONFORMANCE)
    );

    Ok(())
}

#[test]
fn test_generate_default_output_under_source_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;

    let output = test.generate_command().arg("Exports").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("Exports/LocalisableString.swift").exists());

    Ok(())
}

#[test]
fn test_generate_merges_existing_table() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;
    test.write_file(
        "Localizable.strings",
        concat!(
            "\"Message.welcome\" = \"Welcome!\";\n",
            "\"Message.farewell\" = \"Goodbye\";\n",
        ),
    )?;

    let output = test
        .generate_command()
        .args(["Exports", "-o", "Generated", "-l", "Localizable.strings"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("warning: Message.farewell  unused-translation"));

    assert_eq!(
        test.read_file("Localizable.strings")?,
        format!(
            concat!(
                "{}\n\n",
                "\"Message.greeting(name: %@)\" = \"\";\n\n",
                "\"Message.welcome\" = \"Welcome!\";\n\n",
                "\"Message.farewell\" = \"Goodbye\";\t/* unused */\n\n",
            ),
            TABLE_BANNER
        )
    );

    // A second run over its own output is stable.
    let before = test.read_file("Localizable.strings")?;
    test.generate_command()
        .args(["Exports", "-o", "Generated", "-l", "Localizable.strings"])
        .output()?;
    assert_eq!(test.read_file("Localizable.strings")?, before);

    Ok(())
}

#[test]
fn test_generate_decode_failure_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;
    test.write_export(
        "Exports/Broken.json",
        json!([localisable_enum(
            "Broken",
            json!([case("pair(_:_:)"), parameter(None, "Int")])
        )]),
    )?;

    let output = test
        .generate_command()
        .args(["Exports", "-o", "Generated", "-l", "Localizable.strings"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("decode-failure"), "stderr: {}", err);
    assert!(err.contains("--> Broken.json"), "stderr: {}", err);
    assert!(stdout(&output).contains("1 unit failed to decode; nothing was written"));
    assert!(!test.root().join("Generated").exists());
    assert!(!test.root().join("Localizable.strings").exists());

    Ok(())
}

#[test]
fn test_generate_without_source_path() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no source path given"));

    Ok(())
}

#[test]
fn test_generate_unsupported_table_format() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;

    let output = test
        .generate_command()
        .args(["Exports", "-l", "Localizable.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unsupported translation table format"));
    assert!(!test.root().join("Exports/LocalisableString.swift").exists());

    Ok(())
}

#[test]
fn test_generate_build_phase_environment() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;

    let output = test
        .generate_command()
        .env("SRCROOT", test.root().join("Exports"))
        .env("SCRIPT_OUTPUT_FILE_0", test.root().join("Build/Strings.swift"))
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("Build/Strings.swift").exists());

    // SCRIPT_INPUT_FILE_0 takes precedence over SRCROOT.
    test.write_export("Single/Only.json", json!([message_enum()]))?;
    let output = test
        .generate_command()
        .env("SCRIPT_INPUT_FILE_0", test.root().join("Single/Only.json"))
        .env("SRCROOT", test.root().join("Missing"))
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("Single/LocalisableString.swift").exists());

    Ok(())
}

#[test]
fn test_generate_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".quillrc.json",
        r#"{
            "markerInterface": "Localised",
            "output": "Generated",
            "table": "Base.lproj/Onboarding.strings",
            "exclude": "Legacy"
        }"#,
    )?;
    test.write_export(
        "Title.json",
        json!([{
            "key.kind": "source.lang.swift.decl.enum",
            "key.name": "Title",
            "key.accessibility": "source.lang.swift.accessibility.public",
            "key.inheritedtypes": [{ "key.name": "Localised" }],
            "key.substructure": [case("home")]
        }]),
    )?;
    test.write_export("Legacy/Old.json", json!([message_enum()]))?;

    let output = test.generate_command().arg(".").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let protocol = test.read_file("Generated/Localised.swift")?;
    assert!(protocol.contains("protocol Localised {"));
    assert!(protocol.contains("table: \"Onboarding\")"));
    assert!(test.root().join("Generated/Title.quill.swift").exists());
    assert!(!test.root().join("Generated/Message.quill.swift").exists());
    assert!(
        test.read_file("Base.lproj/Onboarding.strings")?
            .contains("\"Title.home\" = \"\";")
    );

    Ok(())
}

#[test]
fn test_generate_malformed_table_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export("Exports/Login.json", json!([message_enum()]))?;
    test.write_file("Localizable.strings", "\"Message.welcome\" = \"Welcome!\"\n")?;

    let output = test
        .generate_command()
        .args(["Exports", "-o", "Generated", "-l", "Localizable.strings"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("expected ';'"), "stderr: {}", stderr(&output));
    assert!(!test.root().join("Generated").exists());
    assert_eq!(
        test.read_file("Localizable.strings")?,
        "\"Message.welcome\" = \"Welcome!\"\n"
    );

    Ok(())
}

#[test]
fn test_generate_warns_without_entries() -> Result<()> {
    let test = CliTest::new()?;
    test.write_export(
        "Exports/Plain.json",
        json!([{
            "key.kind": "source.lang.swift.decl.struct",
            "key.name": "Plain",
            "key.accessibility": "source.lang.swift.accessibility.internal"
        }]),
    )?;

    let output = test.generate_command().arg("Exports").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(
        err.contains("warning: no localisable entries found  no-entries"),
        "stderr: {}",
        err
    );
    assert!(err.contains("--> Exports"), "stderr: {}", err);
    assert!(stdout(&output).contains("0 entries"));

    Ok(())
}
