use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;

mod entries;
mod generate;
mod init;

const BIN_NAME: &str = "quill";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the upward config search at the project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write a structure export with the given top-level declarations.
    pub fn write_export(&self, path: &str, substructure: Value) -> Result<()> {
        let export = json!({ "key.substructure": substructure });
        self.write_file(path, &serde_json::to_string_pretty(&export)?)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate");
        cmd
    }

    pub fn entries_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("entries");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn access(level: &str) -> String {
    format!("source.lang.swift.accessibility.{}", level)
}

/// `enum <name>: LocalisableString` with the given members.
pub fn localisable_enum(name: &str, members: Value) -> Value {
    json!({
        "key.kind": "source.lang.swift.decl.enum",
        "key.name": name,
        "key.accessibility": access("internal"),
        "key.inheritedtypes": [{ "key.name": "LocalisableString" }],
        "key.substructure": members
    })
}

/// `case <labelled_name>` as a single-element case declaration.
pub fn case(labelled_name: &str) -> Value {
    json!({
        "key.kind": "source.lang.swift.decl.enumcase",
        "key.substructure": [{
            "key.kind": "source.lang.swift.decl.enumelement",
            "key.name": labelled_name
        }]
    })
}

pub fn parameter(name: Option<&str>, type_name: &str) -> Value {
    let mut node = json!({
        "key.kind": "source.lang.swift.decl.var.parameter",
        "key.typename": type_name
    });
    if let Some(name) = name {
        node["key.name"] = json!(name);
    }
    node
}

/// The `Message` enum used across tests: `welcome` and `greeting(name: String)`.
pub fn message_enum() -> Value {
    localisable_enum(
        "Message",
        json!([
            case("welcome"),
            case("greeting(name:)"),
            parameter(Some("name"), "String")
        ]),
    )
}
