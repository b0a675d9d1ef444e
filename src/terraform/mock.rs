// ABOUTME: Scripted Terraform executor for tests.
// ABOUTME: Returns predefined outputs per stage and records every invocation.

use super::{ExecError, StageInvocation, StageOutput, TerraformRunner};
use crate::types::Stage;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Test double standing in for the real CLI.
///
/// Every stage succeeds with empty output unless a response or error was
/// scripted for it. Invocations are captured for verification.
#[derive(Clone, Default)]
pub struct MockTerraform {
    responses: Arc<Mutex<HashMap<Stage, StageOutput>>>,
    errors: Arc<Mutex<HashMap<Stage, ExecErrorScript>>>,
    invocations: Arc<Mutex<Vec<StageInvocation>>>,
}

#[derive(Clone)]
enum ExecErrorScript {
    Timeout { seconds: u64 },
}

impl MockTerraform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a failing stage with the given diagnostic on stderr.
    pub fn fail(self, stage: Stage, stderr: impl Into<String>) -> Self {
        self.responses.lock().insert(
            stage,
            StageOutput {
                exit_code: Some(1),
                stdout: String::new(),
                stderr: stderr.into(),
            },
        );
        self
    }

    /// Script a succeeding stage with the given stdout.
    pub fn succeed_with(self, stage: Stage, stdout: impl Into<String>) -> Self {
        self.responses.lock().insert(
            stage,
            StageOutput {
                exit_code: Some(0),
                stdout: stdout.into(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Script an executor fault (not a nonzero exit) for a stage.
    pub fn time_out(self, stage: Stage, seconds: u64) -> Self {
        self.errors
            .lock()
            .insert(stage, ExecErrorScript::Timeout { seconds });
        self
    }

    /// Stages invoked so far, in order.
    pub fn invoked_stages(&self) -> Vec<Stage> {
        self.invocations.lock().iter().map(|i| i.stage).collect()
    }

    /// All captured invocations.
    pub fn invocations(&self) -> Vec<StageInvocation> {
        self.invocations.lock().clone()
    }
}

#[async_trait]
impl TerraformRunner for MockTerraform {
    async fn run_stage(&self, invocation: &StageInvocation) -> Result<StageOutput, ExecError> {
        self.invocations.lock().push(invocation.clone());

        if let Some(script) = self.errors.lock().get(&invocation.stage) {
            return match script {
                ExecErrorScript::Timeout { seconds } => Err(ExecError::Timeout {
                    stage: invocation.stage,
                    seconds: *seconds,
                }),
            };
        }

        Ok(self
            .responses
            .lock()
            .get(&invocation.stage)
            .cloned()
            .unwrap_or(StageOutput {
                exit_code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            }))
    }

    async fn version(&self) -> Result<String, ExecError> {
        Ok("Terraform v1.9.5 (mock)".to_string())
    }
}
