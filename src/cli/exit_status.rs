use std::process::ExitCode;

use crate::issues::Issue;

/// Exit status of a quill run.
///
/// - `Success` (0): Completed; warnings may have been reported
/// - `Failure` (1): A source unit failed to decode; nothing was written
/// - `Error` (2): Internal error (no source path, bad config, unsupported
///   table format, I/O failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` when any issue is an error, `Success` otherwise.
    pub fn for_issues(issues: &[Issue]) -> Self {
        if issues.iter().any(Issue::is_error) {
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
