//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style to stderr, leaving stdout to command
//! output (written files, entry listings).

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{
        CommandResult, CommandSummary, EntriesSummary, GenerateSummary, InitSummary, UnitEntry,
    },
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stderr.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

pub fn print(result: &CommandResult, verbose: bool) {
    report(&result.issues);

    match &result.summary {
        CommandSummary::Generate(summary) => {
            print_generate_to(summary, result, verbose, &mut io::stdout().lock());
        }
        CommandSummary::Entries(summary) => {
            print_entries_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
        }
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location where there is one: --> path:line:col
    let location = match issue.location() {
        ReportLocation::Position { path, line, col } => format!("{}:{}:{}", path, line, col),
        ReportLocation::Node { path, node } => format!("{} ({})", path, node),
        ReportLocation::File { path } => path.to_string(),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues.iter().filter(|i| i.is_error()).count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn print_generate_to<W: Write>(
    summary: &GenerateSummary,
    result: &CommandResult,
    verbose: bool,
    writer: &mut W,
) {
    if result.error_count() > 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} failed to decode; nothing was written",
                plural(result.error_count(), "unit", "units")
            )
            .red()
        );
        return;
    }

    for path in &summary.written {
        let _ = writeln!(writer, "{} {}", "Wrote".green().bold(), path.display());
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} with {} from {}",
            plural(summary.conformance_count, "conformance", "conformances"),
            plural(summary.entry_count, "entry", "entries"),
            plural(result.units_checked, "unit", "units")
        )
        .green()
    );

    if let Some(table) = &summary.table {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Updated {} ({}, {} unused)",
                table.path.display(),
                plural(table.entry_count, "entry", "entries"),
                table.unused_count
            )
            .green()
        );
    } else if verbose {
        let _ = writeln!(
            writer,
            "{} no translation table given (use {})",
            "note:".bold(),
            "-l".cyan()
        );
    }
}

/// A listed entry with its table identifier.
#[derive(Serialize)]
struct EntryRecord<'a> {
    identifier: String,
    #[serde(flatten)]
    entry: &'a UnitEntry,
}

fn print_entries_to<W: Write>(summary: &EntriesSummary, writer: &mut W) {
    match summary.format {
        OutputFormat::Json => {
            let records: Vec<EntryRecord> = summary
                .entries
                .iter()
                .map(|entry| EntryRecord {
                    identifier: entry.entry.table_identifier(),
                    entry,
                })
                .collect();
            match serde_json::to_string_pretty(&records) {
                Ok(json) => {
                    let _ = writeln!(writer, "{}", json);
                }
                Err(e) => eprintln!("{} {}", "error:".bold().red(), e),
            }
        }
        OutputFormat::Text => {
            let identifiers: Vec<String> = summary
                .entries
                .iter()
                .map(|entry| entry.entry.table_identifier())
                .collect();
            // Identifiers may contain wide characters; pad by display width.
            let column = identifiers
                .iter()
                .map(|identifier| UnicodeWidthStr::width(identifier.as_str()))
                .max()
                .unwrap_or(0);
            for (identifier, entry) in identifiers.iter().zip(&summary.entries) {
                let padding = column - UnicodeWidthStr::width(identifier.as_str());
                let _ = writeln!(
                    writer,
                    "{}{:padding$}  {}",
                    identifier,
                    "",
                    entry.unit.dimmed(),
                    padding = padding
                );
            }
        }
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!(
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}
