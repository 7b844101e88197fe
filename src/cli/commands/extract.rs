use anyhow::Result;

use super::{
    CommandResult, CommandSummary, ExtractSummary, context::CommandContext, helper::finish,
};
use crate::{
    cli::args::ExtractCommand,
    core::{
        pipeline,
        sources::{scan_sources, write_json},
    },
};

/// Build the source-locale dictionary and, when asked, one template per document.
///
/// Documents that fail to parse are reported and skipped; everything else is
/// still written.
pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let sources = scan_sources(&ctx.source_dir(), &ctx.config)?;

    let output = pipeline::extract(&sources, &ctx.rules, cmd.generate_templates);

    let locale_file = ctx.source_locale_file();
    write_json(&locale_file, &output.locale.to_sorted_value())?;

    let templates_dir = if cmd.generate_templates {
        let dir = ctx.templates_dir();
        for (name, template) in &output.templates {
            write_json(&dir.join(format!("{}.json", name)), template)?;
        }
        Some(dir)
    } else {
        None
    };

    let summary = ExtractSummary {
        locale_file,
        key_count: output.locale.len(),
        documents: output.documents,
        templates_dir,
        template_count: output.templates.len(),
    };

    Ok(finish(CommandSummary::Extract(summary), output.issues))
}
