//! Issue types for generation results.
//!
//! Each issue is self-contained with everything the reporter needs to show it:
//! the unit it concerns, a message, a severity and a rule name. Errors stop a
//! generation run before anything is written; warnings are only reported.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    DecodeFailure,
    SourceDiagnostic,
    DegradedMember,
    DuplicateCase,
    UnusedTranslation,
    NoEntries,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::DecodeFailure => write!(f, "decode-failure"),
            Rule::SourceDiagnostic => write!(f, "source-diagnostic"),
            Rule::DegradedMember => write!(f, "degraded-member"),
            Rule::DuplicateCase => write!(f, "duplicate-case"),
            Rule::UnusedTranslation => write!(f, "unused-translation"),
            Rule::NoEntries => write!(f, "no-entries"),
        }
    }
}

// ============================================================
// Issue Types - Units
// ============================================================

/// Export file could not be read or is not a structure export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub unit: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Export parsed but its declarations could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailureIssue {
    pub unit: String,
    pub error: String,
    /// Source position, when the failure is an error diagnostic.
    pub position: Option<(usize, usize)>,
}

impl DecodeFailureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DecodeFailure
    }
}

/// Warning diagnostic carried by the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWarningIssue {
    pub unit: String,
    pub description: String,
    pub position: Option<(usize, usize)>,
}

impl SourceWarningIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::SourceDiagnostic
    }
}

/// Malformed member decoded as an unrecognised declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedMemberIssue {
    pub unit: String,
    /// Node path within the export, e.g. `substructure/0/substructure/2`.
    pub node: String,
    pub reason: String,
}

impl DegradedMemberIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DegradedMember
    }
}

/// Two case elements of one enumeration share a base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCaseIssue {
    pub unit: String,
    pub type_name: String,
    pub name: String,
}

impl DuplicateCaseIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateCase
    }
}

/// A source root that decoded cleanly but declares nothing localisable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoEntriesIssue {
    pub source: String,
    pub marker_interface: String,
}

impl NoEntriesIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NoEntries
    }
}

// ============================================================
// Issue Types - Translation Table
// ============================================================

/// Translation kept in the table although no entry uses it anymore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedTranslationIssue {
    pub table: String,
    pub identifier: String,
    pub value: String,
}

impl UnusedTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedTranslation
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while generating.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    DecodeFailure(DecodeFailureIssue),
    SourceWarning(SourceWarningIssue),
    DegradedMember(DegradedMemberIssue),
    DuplicateCase(DuplicateCaseIssue),
    UnusedTranslation(UnusedTranslationIssue),
    NoEntries(NoEntriesIssue),
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.report_severity() == Severity::Error
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Line and column in the Swift source an export was made from.
    Position {
        path: &'a str,
        line: usize,
        col: usize,
    },
    /// A node of an export.
    Node { path: &'a str, node: &'a str },
    /// File-level only.
    File { path: &'a str },
}

impl<'a> ReportLocation<'a> {
    fn in_file(path: &'a str, position: Option<(usize, usize)>) -> Self {
        match position {
            Some((line, col)) => ReportLocation::Position { path, line, col },
            None => ReportLocation::File { path },
        }
    }

    pub fn path(&self) -> &'a str {
        match self {
            ReportLocation::Position { path, .. }
            | ReportLocation::Node { path, .. }
            | ReportLocation::File { path } => path,
        }
    }
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls on
/// [`Issue`] without boxing.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.unit }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("exports are produced by `sourcekitten structure --file <file>.swift`")
    }
}

impl Report for DecodeFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::in_file(&self.unit, self.position)
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("no files were written".to_string())
    }
}

impl Report for SourceWarningIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::in_file(&self.unit, self.position)
    }

    fn message(&self) -> String {
        self.description.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for DegradedMemberIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Node {
            path: &self.unit,
            node: &self.node,
        }
    }

    fn message(&self) -> String {
        self.reason.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("decoded as an unrecognised declaration".to_string())
    }
}

impl Report for DuplicateCaseIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.unit }
    }

    fn message(&self) -> String {
        format!("{}.{}", self.type_name, self.name)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("overloaded case elements share one identifier".to_string())
    }
}

impl Report for UnusedTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.table }
    }

    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\") kept and marked as unused", self.value))
    }
}

impl Report for NoEntriesIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.source }
    }

    fn message(&self) -> String {
        "no localisable entries found".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "no type with internal or wider access conforms to `{}`",
            self.marker_interface
        ))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_position(&self) -> (usize, usize) {
        match self.location() {
            ReportLocation::Position { line, col, .. } => (line, col),
            ReportLocation::Node { .. } | ReportLocation::File { .. } => (0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file path, position, rule, message
        self.location()
            .path()
            .cmp(other.location().path())
            .then_with(|| self.sort_position().cmp(&other.sort_position()))
            .then_with(|| self.report_rule().cmp(&other.report_rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
