use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::super::args::{CommonArgs, GenerateCommand};
use super::{CommandResult, CommandSummary, GenerateSummary, TableSummary};
use crate::{
    core::{
        GenerationContext, LocalisationTable,
        generate::{ConformanceGenerator, GeneratedFile, OutputLayout, assemble},
        table::{check_format, table_name},
    },
    issues::{Issue, NoEntriesIssue, UnusedTranslationIssue},
};

/// Resolve the source root: argument or `SCRIPT_INPUT_FILE_0` (via clap), then `SRCROOT`.
pub fn source_root(common: &CommonArgs) -> Result<PathBuf> {
    match common
        .source
        .clone()
        .or_else(|| env::var_os("SRCROOT").map(PathBuf::from))
    {
        Some(source) => Ok(source),
        None => bail!("no source path given (pass SOURCE or set SRCROOT)"),
    }
}

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let source = source_root(&args.common)?;

    if let Some(table) = &args.table {
        check_format(table)?;
    }

    let ctx = GenerationContext::new(&source, args.common.exclude.clone(), args.common.verbose)?;
    let units_checked = ctx.units.len() + failed_unit_count(&ctx.issues);

    let empty_summary = |issues: Vec<Issue>| CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            written: Vec::new(),
            conformance_count: 0,
            entry_count: 0,
            table: None,
        }),
        issues,
        units_checked,
    };

    // Nothing is written unless every unit decoded.
    if ctx.has_errors() {
        return Ok(empty_summary(ctx.issues));
    }

    let table_path = args
        .table
        .or_else(|| ctx.config.table.as_deref().map(|table| ctx.resolve(table)));
    let output = args
        .output
        .or_else(|| ctx.config.output.as_deref().map(|output| ctx.resolve(output)))
        .unwrap_or_else(|| ctx.root_dir.join(format!("{}.swift", ctx.marker_interface())));

    let generator = ConformanceGenerator::new(ctx.extractor());
    let mut conformances = Vec::new();
    for unit in &ctx.units {
        conformances.extend(
            generator
                .generate_all(&unit.tree)
                .with_context(|| format!("Failed to generate conformances for {}", unit.label))?,
        );
    }
    let entries = ctx.entries()?;
    let files = assemble(
        &output,
        ctx.marker_interface(),
        &table_name(table_path.as_deref()),
        &conformances,
    );

    let mut issues = ctx.issues;
    if entries.is_empty() {
        issues.push(Issue::NoEntries(NoEntriesIssue {
            source: source.display().to_string(),
            marker_interface: ctx.config.marker_interface.clone(),
        }));
    }

    // The table is loaded and merged before anything is written, so a
    // malformed table leaves the output untouched.
    let mut table = table_path
        .as_deref()
        .map(LocalisationTable::load)
        .transpose()?;
    let mut unused_count = 0;
    if let Some(table) = &mut table {
        for entry in &entries {
            table.ensure(&entry.table_identifier());
        }
        let label = table.path().display().to_string();
        let unused: Vec<Issue> = table
            .unused()
            .map(|(identifier, value)| {
                Issue::UnusedTranslation(UnusedTranslationIssue {
                    table: label.clone(),
                    identifier: identifier.to_string(),
                    value: value.to_string(),
                })
            })
            .collect();
        unused_count = unused.len();
        issues.extend(unused);
    }

    write_files(&output, &files)?;

    let table = match table {
        Some(mut table) => {
            table.save()?;
            if ctx.verbose {
                eprintln!("{} saved table {}", "note:".bold(), table.path().display());
            }
            Some(TableSummary {
                path: table.path().to_path_buf(),
                entry_count: entries.len(),
                unused_count,
            })
        }
        None => None,
    };

    Ok(CommandResult {
        summary: CommandSummary::Generate(GenerateSummary {
            written: files.into_iter().map(|file| file.path).collect(),
            conformance_count: conformances.len(),
            entry_count: entries.len(),
            table,
        }),
        issues,
        units_checked,
    })
}

/// Units that produced an error issue never made it into the context.
pub fn failed_unit_count(issues: &[Issue]) -> usize {
    issues.iter().filter(|issue| issue.is_error()).count()
}

fn write_files(output: &Path, files: &[GeneratedFile]) -> Result<()> {
    let directory = match OutputLayout::for_path(output) {
        OutputLayout::Directory => Some(output),
        OutputLayout::SingleFile => output.parent().filter(|p| !p.as_os_str().is_empty()),
    };
    if let Some(directory) = directory {
        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create output directory: {:?}", directory))?;
    }

    for file in files {
        fs::write(&file.path, &file.contents)
            .with_context(|| format!("Failed to write generated source: {:?}", file.path))?;
    }
    Ok(())
}
