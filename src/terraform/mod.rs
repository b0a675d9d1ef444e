// ABOUTME: External Terraform CLI collaborator: trait, real executor, test double.
// ABOUTME: terrapin decides what to run; everything stateful happens inside the CLI.

mod cli;
mod detection;
mod error;
mod invocation;
pub mod mock;
pub(crate) mod sealed;

pub use cli::TerraformCli;
pub use detection::{TerraformInfo, detect_terraform};
pub use error::{ExecError, ExecErrorKind};
pub use invocation::StageInvocation;

use async_trait::async_trait;

/// Result of one stage invocation. A nonzero exit is carried here, not as
/// an ExecError; the caller decides what a failure means for the run.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StageOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The external tool's diagnostic output, unmodified. Terraform writes
    /// errors to stderr; fall back to stdout when stderr is empty.
    pub fn diagnostic(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Executes Terraform stage invocations.
#[async_trait]
pub trait TerraformRunner: sealed::Sealed + Send + Sync {
    /// Run one stage to completion and capture its output.
    async fn run_stage(&self, invocation: &StageInvocation) -> Result<StageOutput, ExecError>;

    /// Version handshake with the binary.
    async fn version(&self) -> Result<String, ExecError>;
}
