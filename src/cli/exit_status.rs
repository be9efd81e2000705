use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed and found what was asked for
/// - `Failure` (1): Command completed but the key, location or literal does not exist
/// - `Error` (2): Command failed (invalid config, missing language folder, unreadable file)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Nothing was found for the query.
    Failure,
    Error,
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
