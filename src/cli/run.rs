//! Dispatches a parsed command to its handler.
//!
//! # Returns
//! - `Ok(CommandResult)` with the command summary and the issues it found
//! - `Err` if the command could not run at all (bad config, missing directory, I/O)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, extract::extract, init::init, populate::populate},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Populate(cmd)) => populate(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
