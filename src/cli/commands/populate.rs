use anyhow::Result;

use super::{
    CommandResult, CommandSummary, PopulateSummary, context::CommandContext, helper::finish,
};
use crate::{
    cli::args::PopulateCommand,
    core::{
        pipeline,
        sources::{scan_locales, scan_templates, write_json},
    },
};

/// Resolve every template against every locale file and write one merged
/// document per template.
pub fn populate(cmd: PopulateCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let templates = scan_templates(&ctx.templates_dir())?;
    let locales = scan_locales(&ctx.locales_dir())?;

    let output = pipeline::populate(&templates, &locales);

    let output_dir = ctx.output_dir();
    let mut document_names = Vec::with_capacity(output.documents.len());
    for (name, document) in &output.documents {
        write_json(&output_dir.join(format!("{}.json", name)), document)?;
        document_names.push(name.clone());
    }

    let summary = PopulateSummary {
        output_dir,
        document_names,
        locales: output.locales,
    };

    Ok(finish(CommandSummary::Populate(summary), output.issues))
}
