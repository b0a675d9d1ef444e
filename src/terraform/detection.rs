// ABOUTME: Terraform binary handshake.
// ABOUTME: Verifies the collaborator exists before any stage is attempted.

use super::error::{ExecError, SpawnSnafu};
use snafu::ResultExt;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct TerraformInfo {
    /// First line of `terraform version`, e.g. "Terraform v1.9.5".
    pub version: String,
}

/// Check that the configured binary answers `terraform version`.
pub async fn detect_terraform(binary: &str) -> Result<TerraformInfo, ExecError> {
    let output = Command::new(binary)
        .arg("version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .context(SpawnSnafu {
            binary: binary.to_string(),
        })?;

    if !output.status.success() {
        return Err(ExecError::NotAvailable {
            binary: binary.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    if version.is_empty() {
        return Err(ExecError::NotAvailable {
            binary: binary.to_string(),
            message: "version handshake produced no output".to_string(),
        });
    }

    tracing::debug!("detected {version}");
    Ok(TerraformInfo { version })
}
