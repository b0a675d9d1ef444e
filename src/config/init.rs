// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates terrapin.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, project: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = template_yaml(project.unwrap_or("my-platform"));
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

pub(super) fn template_yaml(project: &str) -> String {
    format!(
        r#"project: {project}

terraform:
  binary: terraform
  working_dir: infra
  stage_timeout: 1h

# Cloud identity handed to Terraform as ARM_* variables.
# Values default to the ARM_CLIENT_ID / ARM_TENANT_ID / ARM_SUBSCRIPTION_ID
# environment variables; uncomment to point elsewhere.
# auth:
#   client_id: {{ env: AZURE_CLIENT_ID }}
#   tenant_id: {{ env: AZURE_TENANT_ID }}
#   subscription_id: {{ env: AZURE_SUBSCRIPTION_ID }}

# Stage flags a manual run starts from. Mutating stages stay off unless
# requested explicitly.
dispatch_defaults:
  init: true
  fmt: true
  validate: true
  plan: true
  apply: false
  destroy: false

# Stages whose failure is reported but does not halt the run.
best_effort:
  - fmt

environments:
  dev:
    tfvars: envs/dev.tfvars
    backend:
      resource_group: rg-terraform-state
      storage_account: stterraformstate
      container: tfstate
      # key defaults to dev.tfstate

  prod:
    tfvars: envs/prod.tfvars
    auto_apply_on_push: true
    backend:
      resource_group: rg-terraform-state
      storage_account: stterraformstate
      container: tfstate
    approval:
      required: true
      reviewers:
        - platform-lead
      branch: main
"#
    )
}
