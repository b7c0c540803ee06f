use anyhow::Result;

use super::super::args::EntriesCommand;
use super::generate::{failed_unit_count, source_root};
use super::{CommandResult, CommandSummary, EntriesSummary, UnitEntry};
use crate::core::GenerationContext;

pub fn entries(cmd: EntriesCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let source = source_root(&args.common)?;
    let ctx = GenerationContext::new(&source, args.common.exclude.clone(), args.common.verbose)?;

    let mut entries = Vec::new();
    if !ctx.has_errors() {
        let extractor = ctx.extractor();
        for unit in &ctx.units {
            entries.extend(
                extractor
                    .entries(&unit.tree)?
                    .into_iter()
                    .map(|entry| UnitEntry {
                        unit: unit.label.clone(),
                        entry,
                    }),
            );
        }
    }

    Ok(CommandResult {
        summary: CommandSummary::Entries(EntriesSummary {
            entries,
            format: args.format,
        }),
        units_checked: ctx.units.len() + failed_unit_count(&ctx.issues),
        issues: ctx.issues,
    })
}
