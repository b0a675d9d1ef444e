// ABOUTME: Remote state backend coordinates for one environment.
// ABOUTME: Rendered as -backend-config arguments on terraform init.

use crate::types::StateKey;
use serde::Deserialize;

/// Raw backend section as written in terrapin.yml. The state key is
/// optional; it defaults to `<env>.tfstate` during resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub resource_group: String,
    pub storage_account: String,
    pub container: String,
    #[serde(default)]
    pub key: Option<StateKey>,
}

/// Resolved backend coordinates. One state object per environment; runs
/// for different environments never contend on the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub resource_group: String,
    pub storage_account: String,
    pub container: String,
    pub key: StateKey,
}

impl BackendSettings {
    /// `-backend-config=` pairs for terraform init.
    pub fn backend_config_args(&self) -> Vec<String> {
        vec![
            format!("-backend-config=resource_group_name={}", self.resource_group),
            format!(
                "-backend-config=storage_account_name={}",
                self.storage_account
            ),
            format!("-backend-config=container_name={}", self.container),
            format!("-backend-config=key={}", self.key),
        ]
    }
}
