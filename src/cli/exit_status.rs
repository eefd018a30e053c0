use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// Anomalies found during a completed run (skipped files, duplicate ids,
/// unmatched entries) are reported in the summary but do not fail the run;
/// only an unrecoverable failure exits non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed; anomaly counts are in the summary.
    Success,
    /// Run aborted (missing root path, bad config, unreadable catalog).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
