// ABOUTME: Application-wide error types for terrapin.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Stage;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    UnknownEnvironment(#[from] crate::registry::RegistryError),

    #[error("invalid stage selection: {0}")]
    Gate(#[from] crate::gate::GateError),

    #[error(
        "approval not satisfied for environment '{environment}': {stage} requires sign-off from one of [{reviewers}]"
    )]
    ApprovalNotSatisfied {
        environment: String,
        stage: Stage,
        reviewers: String,
    },

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("terraform executor error: {0}")]
    Terraform(#[from] crate::terraform::ExecError),

    #[error("hook failed: {0}")]
    Hook(String),

    #[error("run failed at stage '{stage}'")]
    RunFailed { stage: Stage },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
