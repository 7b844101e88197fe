//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Build the source-locale dictionary (and optionally templates)
//! - `populate`: Resolve templates against every locale into merged documents
//! - `init`: Write a `.tomekeyrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Populate(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to start looking for .tomekeyrc.json from (defaults to the current directory)
    #[arg(long, env = "TOMEKEY_ROOT")]
    pub root: Option<PathBuf>,

    /// Source locale (overrides config file)
    #[arg(long)]
    pub source_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Also write one template per source document
    #[arg(long)]
    pub generate_templates: bool,
}

#[derive(Debug, Args)]
pub struct PopulateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Bundled rule tables for `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Rules for the D&D 5e SRD dataset
    #[value(name = "5e-srd")]
    Srd5e,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Start from a bundled rule table instead of the defaults
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the source-locale dictionary from the source documents
    Extract(ExtractCommand),
    /// Resolve templates against every locale and write merged documents
    Populate(PopulateCommand),
    /// Initialize a new .tomekeyrc.json configuration file
    Init(InitCommand),
}
