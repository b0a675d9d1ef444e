// ABOUTME: Executor error types with SNAFU pattern.
// ABOUTME: Reserved for spawn/timeout/IO faults; a nonzero exit is not an error here.

use crate::types::Stage;
use snafu::Snafu;

/// Faults talking to the external Terraform CLI. A stage that runs and
/// exits nonzero is reported through its StageOutput instead.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExecError {
    #[snafu(display("failed to spawn '{binary}': {source}"))]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[snafu(display("stage '{stage}' exceeded its {seconds}s timeout and was killed"))]
    Timeout { stage: Stage, seconds: u64 },

    #[snafu(display("failed to collect process output: {source}"))]
    CollectOutput { source: std::io::Error },

    #[snafu(display("terraform binary '{binary}' is not usable: {message}"))]
    NotAvailable { binary: String, message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecErrorKind {
    /// The binary could not be started at all.
    Spawn,
    /// The stage ran past its wall-clock limit.
    Timeout,
    /// Reading the process's output failed.
    Io,
    /// The binary exists but did not answer the version handshake.
    NotAvailable,
}

impl ExecError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ExecErrorKind {
        match self {
            ExecError::Spawn { .. } => ExecErrorKind::Spawn,
            ExecError::Timeout { .. } => ExecErrorKind::Timeout,
            ExecError::CollectOutput { .. } => ExecErrorKind::Io,
            ExecError::NotAvailable { .. } => ExecErrorKind::NotAvailable,
        }
    }
}
