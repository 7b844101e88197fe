use std::path::PathBuf;

use crate::core::DocumentStats;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Populate(PopulateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub locale_file: PathBuf,
    pub key_count: usize,
    pub documents: Vec<DocumentStats>,
    /// Set when templates were generated.
    pub templates_dir: Option<PathBuf>,
    pub template_count: usize,
}

#[derive(Debug)]
pub struct PopulateSummary {
    pub output_dir: PathBuf,
    pub document_names: Vec<String>,
    pub locales: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub config_file: PathBuf,
    pub preset: Option<&'static str>,
}

/// Result of running tomekey commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found while running the command, in the order they were found.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
}
