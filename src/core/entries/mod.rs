//! Localizable entries derived from declaration trees.
//!
//! An entry describes one localizable message: its identifier in the
//! translation table and the typed placeholders of its arguments.
//!
//! ## Module Structure
//!
//! - `extractor`: Accessibility-gated walk finding marker conformances
//! - `naming`: Pluggable qualified-name shortening

pub mod extractor;
pub mod naming;

use std::fmt;

use serde::Serialize;

use crate::core::declarations::DeclId;

pub use extractor::Extractor;
pub use naming::{DEFAULT_SHORTENED_INFIXES, InvalidInfix, ShorteningRules};

/// Default name of the marker protocol.
pub const DEFAULT_MARKER_INTERFACE: &str = "LocalisableString";

/// The format placeholder used for an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderKind {
    /// `%ld`
    Integer,
    /// `%f`
    FloatingPoint,
    /// `%@`
    String,
}

impl PlaceholderKind {
    /// Choose a placeholder by exact type name: `Int` and `Double` are
    /// numeric, everything else (including an inferred type) is a string.
    pub fn for_type_name(type_name: Option<&str>) -> Self {
        match type_name {
            Some("Int") => PlaceholderKind::Integer,
            Some("Double") => PlaceholderKind::FloatingPoint,
            _ => PlaceholderKind::String,
        }
    }

    pub fn specifier(&self) -> &'static str {
        match self {
            PlaceholderKind::Integer => "%ld",
            PlaceholderKind::FloatingPoint => "%f",
            PlaceholderKind::String => "%@",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryParameter {
    /// The argument label, or `None` for positional arguments.
    pub label: Option<String>,
    pub placeholder: PlaceholderKind,
}

impl EntryParameter {
    pub fn new(label: Option<String>, type_name: Option<&str>) -> Self {
        Self {
            label,
            placeholder: PlaceholderKind::for_type_name(type_name),
        }
    }

    /// `label: %@` for labelled parameters, `%@` otherwise.
    pub fn pattern(&self) -> String {
        match &self.label {
            Some(label) => format!("{}: {}", label, self.placeholder.specifier()),
            None => self.placeholder.specifier().to_string(),
        }
    }
}

/// One localizable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizableEntry {
    /// Shortened qualified name, e.g. `Login.Message.greeting`.
    pub name: String,
    pub parameters: Vec<EntryParameter>,
}

impl LocalizableEntry {
    /// The identifier in the translation table, e.g. `Message.greeting(name: %@)`.
    pub fn table_identifier(&self) -> String {
        if self.parameters.is_empty() {
            return self.name.clone();
        }
        let patterns: Vec<String> = self.parameters.iter().map(EntryParameter::pattern).collect();
        format!("{}({})", self.name, patterns.join(", "))
    }
}

impl fmt::Display for LocalizableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_identifier())
    }
}

/// A type declaring conformance to the marker protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conformance {
    pub implementing_type: DeclId,
    pub interface_name: String,
}
