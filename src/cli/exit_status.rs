use std::process::ExitCode;

use crate::lint::RunReport;

/// Exit status for the CLI, following common conventions for linter tools.
///
/// - `Success` (0): every job passed, or there were no jobs
/// - `Failure` (1): at least one job failed a check
/// - `Error` (2): the run could not complete (bad directory, bad config
///   file, unparseable job)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every job passed.
    Success,
    /// At least one job failed a check.
    Failure,
    /// Setup or parse error.
    Error,
}

impl From<&RunReport> for ExitStatus {
    fn from(report: &RunReport) -> Self {
        if report.passed() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
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
