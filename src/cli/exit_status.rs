use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, nothing at error severity
/// - `Failure` (1): Command completed but some files could not be processed
/// - `Error` (2): Command failed before producing output (config error, missing directory, etc.)
///
/// Warnings alone never fail a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, nothing at error severity.
    Success,
    /// Command completed but reported errors.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl From<&CommandResult> for ExitStatus {
    fn from(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
