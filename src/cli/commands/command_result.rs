use std::path::PathBuf;

use serde::Serialize;

use super::super::{args::OutputFormat, exit_status::ExitStatus};
use crate::{core::LocalizableEntry, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Entries(EntriesSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct GenerateSummary {
    /// Generated source files, in write order. Empty when generation stopped.
    pub written: Vec<PathBuf>,
    pub conformance_count: usize,
    pub entry_count: usize,
    pub table: Option<TableSummary>,
}

#[derive(Debug)]
pub struct TableSummary {
    pub path: PathBuf,
    pub entry_count: usize,
    pub unused_count: usize,
}

#[derive(Debug)]
pub struct EntriesSummary {
    pub entries: Vec<UnitEntry>,
    pub format: OutputFormat,
}

/// An entry and the unit declaring it.
#[derive(Debug, Serialize)]
pub struct UnitEntry {
    pub unit: String,
    #[serde(flatten)]
    pub entry: LocalizableEntry,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running quill commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Issues from decoding and table merging.
    pub issues: Vec<Issue>,
    /// Number of export files that were read.
    pub units_checked: usize,
}

impl CommandResult {
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Init(InitSummary { created: false }) => ExitStatus::Failure,
            _ => ExitStatus::for_issues(&self.issues),
        }
    }
}
