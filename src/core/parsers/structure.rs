//! Raw node model of a SourceKit structure export.
//!
//! The export is a keyed record tree. Only the fields below are read; every
//! other field (offsets, lengths, attributes, ...) is ignored.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Severity tag of an error diagnostic.
pub const SEVERITY_ERROR: &str = "source.diagnostic.severity.error";

/// Severity tag of a warning diagnostic.
pub const SEVERITY_WARNING: &str = "source.diagnostic.severity.warning";

/// One record of the structure export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawNode {
    #[serde(rename = "key.kind")]
    pub kind: Option<String>,
    #[serde(rename = "key.name")]
    pub name: Option<String>,
    #[serde(rename = "key.typename")]
    pub type_name: Option<String>,
    #[serde(rename = "key.inheritedtypes", default)]
    pub inherited_types: Vec<InheritedType>,
    #[serde(rename = "key.accessibility")]
    pub accessibility: Option<String>,
    #[serde(rename = "key.substructure", default)]
    pub substructure: Vec<RawNode>,
}

impl RawNode {
    /// Names of the inherited types, in declaration order.
    pub fn inherited_type_names(&self) -> Vec<String> {
        self.inherited_types
            .iter()
            .map(|inherited| inherited.name.clone())
            .collect()
    }
}

/// An entry of `key.inheritedtypes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InheritedType {
    #[serde(rename = "key.name")]
    pub name: String,
}

/// A diagnostic emitted by the analysis service while producing the export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawDiagnostic {
    #[serde(rename = "key.severity")]
    pub severity: String,
    #[serde(rename = "key.description", default)]
    pub description: String,
    #[serde(rename = "key.line")]
    pub line: Option<usize>,
    #[serde(rename = "key.column")]
    pub column: Option<usize>,
}

impl RawDiagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == SEVERITY_ERROR
    }

    pub fn is_warning(&self) -> bool {
        self.severity == SEVERITY_WARNING
    }
}

/// The root of a structure export: the top-level declarations of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructureExport {
    #[serde(rename = "key.substructure", default)]
    pub substructure: Vec<RawNode>,
    #[serde(rename = "key.diagnostics", default)]
    pub diagnostics: Vec<RawDiagnostic>,
}

pub fn parse_structure(content: &str) -> serde_json::Result<StructureExport> {
    serde_json::from_str(content)
}

pub fn parse_structure_file(path: &Path) -> Result<StructureExport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read structure export: {:?}", path))?;

    parse_structure(&content)
        .with_context(|| format!("Failed to parse structure export: {:?}", path))
}
