// ABOUTME: Per-environment deployment target configuration.
// ABOUTME: Raw YAML form plus the resolved, immutable Environment record.

use super::approval::{ApprovalConfig, ApprovalPolicy};
use super::backend::{BackendConfig, BackendSettings};
use crate::error::{Error, Result};
use crate::types::{EnvName, StateKey};
use serde::Deserialize;
use std::path::PathBuf;

/// Raw environment section as written in terrapin.yml.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    /// Variable file passed to plan and destroy.
    pub tfvars: PathBuf,

    pub backend: BackendConfig,

    #[serde(default)]
    pub approval: Option<ApprovalConfig>,

    /// Push-trigger posture: when true, a push run is allowed to apply
    /// after a successful plan. The production setting.
    #[serde(default)]
    pub auto_apply_on_push: bool,
}

impl EnvironmentConfig {
    pub(super) fn validate(&self, name: &str) -> Result<()> {
        ApprovalPolicy::resolve(self.approval.as_ref())
            .map(|_| ())
            .map_err(|e| Error::InvalidConfig(format!("environment '{name}': {e}")))
    }

    /// Resolve into the immutable runtime record. The state key defaults
    /// to `<env>.tfstate`.
    pub fn resolve(&self, name: EnvName) -> Result<Environment> {
        let approval = ApprovalPolicy::resolve(self.approval.as_ref())
            .map_err(|e| Error::InvalidConfig(format!("environment '{name}': {e}")))?;

        let key = self
            .backend
            .key
            .clone()
            .unwrap_or_else(|| StateKey::for_env(&name));

        Ok(Environment {
            backend: BackendSettings {
                resource_group: self.backend.resource_group.clone(),
                storage_account: self.backend.storage_account.clone(),
                container: self.backend.container.clone(),
                key,
            },
            tfvars: self.tfvars.clone(),
            approval,
            auto_apply_on_push: self.auto_apply_on_push,
            name,
        })
    }
}

/// A named deployment target. Created from static configuration; never
/// mutated at run time.
#[derive(Debug, Clone)]
pub struct Environment {
    pub name: EnvName,
    pub tfvars: PathBuf,
    pub backend: BackendSettings,
    pub approval: ApprovalPolicy,
    pub auto_apply_on_push: bool,
}

impl Environment {
    #[cfg(test)]
    pub(crate) fn for_tests(name: EnvName, auto_apply_on_push: bool) -> Self {
        let key = StateKey::for_env(&name);
        Self {
            tfvars: PathBuf::from(format!("envs/{name}.tfvars")),
            backend: BackendSettings {
                resource_group: "rg-state".to_string(),
                storage_account: "ststate".to_string(),
                container: "tfstate".to_string(),
                key,
            },
            approval: ApprovalPolicy::None,
            auto_apply_on_push,
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: Option<&str>) -> EnvironmentConfig {
        EnvironmentConfig {
            tfvars: PathBuf::from("envs/uat.tfvars"),
            backend: BackendConfig {
                resource_group: "rg".to_string(),
                storage_account: "sa".to_string(),
                container: "tfstate".to_string(),
                key: key.map(|k| StateKey::new(k).unwrap()),
            },
            approval: None,
            auto_apply_on_push: false,
        }
    }

    #[test]
    fn state_key_defaults_to_env_name() {
        let env = raw(None).resolve(EnvName::new("uat").unwrap()).unwrap();
        assert_eq!(env.backend.key.as_str(), "uat.tfstate");
    }

    #[test]
    fn explicit_state_key_wins() {
        let env = raw(Some("custom/uat.tfstate"))
            .resolve(EnvName::new("uat").unwrap())
            .unwrap();
        assert_eq!(env.backend.key.as_str(), "custom/uat.tfstate");
    }
}
