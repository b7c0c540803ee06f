//! Merging entry identifiers into a `.strings` translation table.
//!
//! A table keeps the translations read from disk (`saved`) apart from the
//! identifiers ensured during a run (`pending`). Saving writes every pending
//! identifier, then keeps saved non-empty translations nobody ensured,
//! marked as unused, so no translation is silently lost.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::parsers::strings::{parse_strings_file, quote};

/// First line of a saved table.
pub const TABLE_BANNER: &str =
    "/* This file has been generated by quill. Do not edit this file manually. */";

/// Table name used when no table path is given.
pub const DEFAULT_TABLE_NAME: &str = "Localizable";

const TABLE_EXTENSION: &str = "strings";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    UnsupportedFormat { path: PathBuf },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::UnsupportedFormat { path } => write!(
                f,
                "unsupported translation table format: {:?} (expected a .{} file)",
                path, TABLE_EXTENSION
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Check that `path` names a `.strings` file (case-insensitive).
pub fn check_format(path: &Path) -> Result<(), TableError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(TABLE_EXTENSION) => Ok(()),
        _ => Err(TableError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// The table name a path refers to: its file stem, e.g. `Localizable`.
pub fn table_name(path: Option<&Path>) -> String {
    path.and_then(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string())
}

#[derive(Debug)]
pub struct LocalisationTable {
    path: PathBuf,
    saved: BTreeMap<String, String>,
    pending: BTreeMap<String, String>,
    saved_once: bool,
}

impl LocalisationTable {
    /// Load the table at `path`, or start empty when no file exists yet.
    pub fn load(path: &Path) -> Result<Self> {
        check_format(path)?;
        let saved = if path.exists() {
            parse_strings_file(path)?
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect()
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            saved,
            pending: BTreeMap::new(),
            saved_once: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        table_name(Some(&self.path))
    }

    /// The current translation of `identifier`: pending first, then saved.
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.pending
            .get(identifier)
            .or_else(|| self.saved.get(identifier))
            .map(String::as_str)
    }

    pub fn set(&mut self, identifier: impl Into<String>, value: impl Into<String>) {
        self.pending.insert(identifier.into(), value.into());
    }

    /// Keep `identifier` in the table, carrying its current translation
    /// forward or adding it with an empty one.
    pub fn ensure(&mut self, identifier: &str) {
        let value = self.get(identifier).unwrap_or_default().to_string();
        self.pending.insert(identifier.to_string(), value);
    }

    /// Saved non-empty translations not ensured or set during this run.
    pub fn unused(&self) -> impl Iterator<Item = (&str, &str)> {
        self.saved
            .iter()
            .filter(|(identifier, value)| {
                !value.is_empty() && !self.pending.contains_key(identifier.as_str())
            })
            .map(|(identifier, value)| (identifier.as_str(), value.as_str()))
    }

    pub fn render(&self) -> String {
        let mut contents = format!("{}\n\n", TABLE_BANNER);
        for (identifier, value) in &self.pending {
            contents.push_str(&format!("{} = {};\n\n", quote(identifier), quote(value)));
        }
        for (identifier, value) in self.unused() {
            contents.push_str(&format!(
                "{} = {};\t/* unused */\n\n",
                quote(identifier),
                quote(value)
            ));
        }
        contents
    }

    /// Write the table to its path.
    ///
    /// # Panics
    ///
    /// Panics when called a second time on the same table.
    pub fn save(&mut self) -> Result<()> {
        assert!(
            !self.saved_once,
            "translation table {:?} has already been saved; load it again",
            self.path
        );
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&self.path, self.render())
            .with_context(|| format!("Failed to write translation table: {:?}", self.path))?;
        self.saved_once = true;
        Ok(())
    }
}
