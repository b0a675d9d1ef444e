// ABOUTME: Configuration types and parsing for terrapin.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, and per-environment settings.

mod approval;
mod backend;
mod env_value;
mod environment;
mod init;

pub use approval::{ApprovalConfig, ApprovalPolicy};
pub use backend::{BackendConfig, BackendSettings};
pub use env_value::EnvValue;
pub use environment::{Environment, EnvironmentConfig};
pub use init::init_config;

use crate::error::{Error, Result};
use crate::gate::StageFlags;
use crate::types::Stage;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "terrapin.yml";
pub const CONFIG_FILENAME_ALT: &str = "terrapin.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".terrapin/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub terraform: TerraformSettings,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Stage flags a manual dispatch starts from when the caller gives no
    /// explicit per-stage input. Policy, not a constant.
    #[serde(default)]
    pub dispatch_defaults: StageFlags,

    /// Stages whose failure is reported but does not halt the run.
    #[serde(default)]
    pub best_effort: Vec<Stage>,

    pub environments: HashMap<String, EnvironmentConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerraformSettings {
    /// Terraform binary name or path.
    pub binary: String,

    /// Directory containing the root module; all stages run here.
    pub working_dir: PathBuf,

    /// Wall-clock limit per stage invocation.
    #[serde(with = "humantime_serde")]
    pub stage_timeout: Duration,
}

impl Default for TerraformSettings {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
            working_dir: PathBuf::from("."),
            stage_timeout: default_stage_timeout(),
        }
    }
}

fn default_stage_timeout() -> Duration {
    Duration::from_secs(60 * 60)
}

/// Cloud identity inputs, handed to Terraform as ARM_* environment
/// variables. Opaque to terrapin; the OIDC exchange happens downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub client_id: EnvValue,
    pub tenant_id: EnvValue,
    pub subscription_id: EnvValue,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: EnvValue::from_env("ARM_CLIENT_ID"),
            tenant_id: EnvValue::from_env("ARM_TENANT_ID"),
            subscription_id: EnvValue::from_env("ARM_SUBSCRIPTION_ID"),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn validate(&self) -> Result<()> {
        if self.environments.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one environment is required".to_string(),
            ));
        }

        for stage in &self.best_effort {
            if !matches!(stage, Stage::Fmt | Stage::Validate) {
                return Err(Error::InvalidConfig(format!(
                    "stage '{stage}' cannot be best-effort; only fmt and validate may be"
                )));
            }
        }

        for (name, env) in &self.environments {
            crate::types::EnvName::new(name)
                .map_err(|e| Error::InvalidConfig(format!("environment '{name}': {e}")))?;
            env.validate(name)?;
        }

        Ok(())
    }

    pub fn template(project: Option<&str>) -> String {
        init::template_yaml(project.unwrap_or("my-platform"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back() {
        let yaml = Config::template(Some("demo"));
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.project.as_deref(), Some("demo"));
        assert!(config.environments.contains_key("dev"));
        assert!(config.environments.contains_key("prod"));
    }

    #[test]
    fn empty_environments_are_rejected() {
        let err = Config::from_yaml("environments: {}\n").unwrap_err();
        assert!(err.to_string().contains("at least one environment"));
    }

    #[test]
    fn best_effort_apply_is_rejected() {
        let yaml = r#"
best_effort: [apply]
environments:
  dev:
    tfvars: envs/dev.tfvars
    backend:
      resource_group: rg
      storage_account: sa
      container: tfstate
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("best-effort"));
    }

    #[test]
    fn stage_timeout_parses_humantime() {
        let yaml = r#"
terraform:
  stage_timeout: 15m
environments:
  dev:
    tfvars: envs/dev.tfvars
    backend:
      resource_group: rg
      storage_account: sa
      container: tfstate
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.terraform.stage_timeout, Duration::from_secs(900));
    }
}
