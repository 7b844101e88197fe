use std::process::ExitCode;

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, ExtractCommand, InitCommand, PopulateCommand, Preset};
pub use commands::{CommandResult, CommandSummary};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(ExitStatus::from(&result).into())
}
