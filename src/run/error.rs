// ABOUTME: Error types for pipeline run execution.
// ABOUTME: Covers approval preconditions, artifact preparation, and executor faults.

use crate::terraform::ExecError;
use crate::types::Stage;
use thiserror::Error;

/// Errors that abort a run before or between stages. A stage that runs and
/// exits nonzero is not an error here; it becomes a Failed outcome in the
/// report.
#[derive(Debug, Error)]
pub enum RunError {
    /// A mutating stage was requested without the environment's approval
    /// gate having been satisfied upstream.
    #[error(
        "approval not satisfied for environment '{environment}': {stage} requires sign-off from one of [{reviewers}]"
    )]
    ApprovalNotSatisfied {
        environment: String,
        stage: Stage,
        reviewers: String,
    },

    #[error("failed to prepare plan artifact directory: {source}")]
    PlanDir { source: std::io::Error },

    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl From<RunError> for crate::error::Error {
    fn from(err: RunError) -> Self {
        match err {
            RunError::ApprovalNotSatisfied {
                environment,
                stage,
                reviewers,
            } => crate::error::Error::ApprovalNotSatisfied {
                environment,
                stage,
                reviewers,
            },
            RunError::PlanDir { source } => crate::error::Error::Io(source),
            RunError::Exec(e) => crate::error::Error::Terraform(e),
        }
    }
}
