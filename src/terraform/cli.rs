// ABOUTME: Real Terraform executor backed by tokio::process.
// ABOUTME: Captures output, enforces per-stage timeouts, kills on overrun.

use super::error::{CollectOutputSnafu, SpawnSnafu};
use super::{ExecError, StageInvocation, StageOutput, TerraformRunner};
use async_trait::async_trait;
use snafu::ResultExt;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs the real `terraform` binary. One instance per run; cheap to build.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    binary: String,
    stage_timeout: Duration,
}

impl TerraformCli {
    pub fn new(binary: impl Into<String>, stage_timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            stage_timeout,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

#[async_trait]
impl TerraformRunner for TerraformCli {
    async fn run_stage(&self, invocation: &StageInvocation) -> Result<StageOutput, ExecError> {
        tracing::info!(
            stage = %invocation.stage,
            dir = %invocation.working_dir.display(),
            "running terraform {}",
            invocation.args.join(" ")
        );

        let mut cmd = Command::new(&self.binary);
        cmd.args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The child must not outlive a timed-out stage.
            .kill_on_drop(true);

        let child = cmd.spawn().context(SpawnSnafu {
            binary: self.binary.clone(),
        })?;

        let output = match tokio::time::timeout(self.stage_timeout, child.wait_with_output()).await
        {
            Ok(result) => result.context(CollectOutputSnafu)?,
            Err(_) => {
                return Err(ExecError::Timeout {
                    stage: invocation.stage,
                    seconds: self.stage_timeout.as_secs(),
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        for line in stdout.lines() {
            tracing::debug!(stage = %invocation.stage, "{line}");
        }
        for line in stderr.lines() {
            tracing::debug!(stage = %invocation.stage, "stderr: {line}");
        }

        Ok(StageOutput {
            exit_code: output.status.code(),
            stdout,
            stderr,
        })
    }

    async fn version(&self) -> Result<String, ExecError> {
        let info = super::detect_terraform(&self.binary).await?;
        Ok(info.version)
    }
}
