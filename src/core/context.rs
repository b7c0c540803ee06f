use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        declarations::{DecodeError, DeclarationTree, TreeWarning},
        entries::{Extractor, LocalizableEntry, ShorteningRules},
        file_scanner::scan_exports,
        parsers::structure::parse_structure_file,
    },
    issues::{
        DecodeFailureIssue, DegradedMemberIssue, DuplicateCaseIssue, Issue, ParseErrorIssue,
        SourceWarningIssue,
    },
};

/// One decoded structure export.
#[derive(Debug)]
pub struct SourceUnit {
    pub path: PathBuf,
    /// Path shown in reports, relative to the source root where possible.
    pub label: String,
    pub tree: DeclarationTree,
}

/// Result of decoding one export file.
#[derive(Debug)]
pub struct UnitOutcome {
    /// `None` when the unit failed to decode.
    pub unit: Option<SourceUnit>,
    pub issues: Vec<Issue>,
}

/// Decodes every unit under a source root.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--exclude`)
/// 2. Environment variables (resolved by clap)
/// 3. `.quillrc.json`, searched upwards from the source root
/// 4. Built-in defaults
pub struct GenerationContext {
    /// Merged configuration.
    pub config: Config,

    /// The source root as given: a directory, or a single export file.
    pub source_root: PathBuf,

    /// Directory relative config paths resolve against.
    pub root_dir: PathBuf,

    /// Units that decoded successfully, sorted by path.
    pub units: Vec<SourceUnit>,

    /// Issues from every unit, including failed ones.
    pub issues: Vec<Issue>,

    pub verbose: bool,

    shortening: ShorteningRules,
}

impl GenerationContext {
    /// Load config, scan the source root and decode every unit in parallel.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid. Per-unit failures are
    /// collected as issues instead.
    pub fn new(source_root: &Path, exclude: Option<String>, verbose: bool) -> Result<Self> {
        let root_dir = if source_root.is_file() {
            source_root
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            source_root.to_path_buf()
        };

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold(),
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if exclude.is_some() {
            config.exclude = exclude;
        }
        config.validate()?;
        let shortening = config.shortening_rules()?;

        let scan_result = scan_exports(
            source_root,
            &config.export_extension,
            config.exclude.as_deref(),
            verbose,
        );
        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        // Trees are independent: decode in parallel, collect in path order.
        let outcomes: Vec<UnitOutcome> = scan_result
            .files
            .par_iter()
            .map(|path| decode_unit(path, &unit_label(&root_dir, path)))
            .collect();

        let mut units = Vec::with_capacity(outcomes.len());
        let mut issues = Vec::new();
        for outcome in outcomes {
            if verbose && let Some(unit) = &outcome.unit {
                eprintln!(
                    "{} decoded {} ({} declarations)",
                    "note:".bold(),
                    unit.label,
                    unit.tree.len()
                );
            }
            units.extend(outcome.unit);
            issues.extend(outcome.issues);
        }

        Ok(Self {
            config,
            source_root: source_root.to_path_buf(),
            root_dir,
            units,
            issues,
            verbose,
            shortening,
        })
    }

    /// Whether any unit failed to decode.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }

    pub fn marker_interface(&self) -> &str {
        &self.config.marker_interface
    }

    pub fn extractor(&self) -> Extractor<'_> {
        Extractor::new(&self.config.marker_interface, &self.shortening)
    }

    /// Entries of every unit, in unit order then pre-order.
    pub fn entries(&self) -> Result<Vec<LocalizableEntry>> {
        let extractor = self.extractor();
        let mut entries = Vec::new();
        for unit in &self.units {
            entries.extend(extractor.entries(&unit.tree)?);
        }
        Ok(entries)
    }

    /// Resolve a config path against the source root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }
}

fn unit_label(root_dir: &Path, path: &Path) -> String {
    path.strip_prefix(root_dir)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Parse and decode one export file.
pub fn decode_unit(path: &Path, label: &str) -> UnitOutcome {
    let export = match parse_structure_file(path) {
        Ok(export) => export,
        Err(e) => {
            return UnitOutcome {
                unit: None,
                issues: vec![Issue::ParseError(ParseErrorIssue {
                    unit: label.to_string(),
                    error: format!("{:#}", e),
                })],
            };
        }
    };

    let mut issues: Vec<Issue> = export
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.is_warning())
        .map(|diagnostic| {
            Issue::SourceWarning(SourceWarningIssue {
                unit: label.to_string(),
                description: diagnostic.description.clone(),
                position: diagnostic.line.map(|line| (line, diagnostic.column.unwrap_or(1))),
            })
        })
        .collect();

    match DeclarationTree::decode(&export) {
        Ok(tree) => {
            issues.extend(tree.warnings().iter().map(|warning| tree_issue(label, warning)));
            UnitOutcome {
                unit: Some(SourceUnit {
                    path: path.to_path_buf(),
                    label: label.to_string(),
                    tree,
                }),
                issues,
            }
        }
        Err(error) => {
            let position = match &error {
                DecodeError::Diagnostic {
                    line: Some(line),
                    column,
                    ..
                } => Some((*line, column.unwrap_or(1))),
                _ => None,
            };
            let error = match &error {
                DecodeError::Diagnostic { description, .. } => description.clone(),
                _ => error.to_string(),
            };
            issues.push(Issue::DecodeFailure(DecodeFailureIssue {
                unit: label.to_string(),
                error,
                position,
            }));
            UnitOutcome { unit: None, issues }
        }
    }
}

fn tree_issue(label: &str, warning: &TreeWarning) -> Issue {
    match warning {
        TreeWarning::DegradedMember { path, reason } => {
            Issue::DegradedMember(DegradedMemberIssue {
                unit: label.to_string(),
                node: path.to_string(),
                reason: reason.clone(),
            })
        }
        TreeWarning::DuplicateCaseName { type_name, name } => {
            Issue::DuplicateCase(DuplicateCaseIssue {
                unit: label.to_string(),
                type_name: type_name.clone(),
                name: name.clone(),
            })
        }
    }
}
