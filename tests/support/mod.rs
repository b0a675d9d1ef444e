// ABOUTME: Shared fixtures for integration tests.
// ABOUTME: Builds environments and run contexts without going through YAML.

#![allow(dead_code)]

use nonempty::NonEmpty;
use std::path::PathBuf;
use terrapin::config::{ApprovalPolicy, BackendSettings, Environment, TerraformSettings};
use terrapin::types::{EnvName, StateKey};

/// An environment with no approval policy.
pub fn environment(name: &str, auto_apply_on_push: bool) -> Environment {
    let env_name = EnvName::new(name).unwrap();
    Environment {
        tfvars: PathBuf::from(format!("envs/{name}.tfvars")),
        backend: BackendSettings {
            resource_group: "rg-terraform-state".to_string(),
            storage_account: "stterraformstate".to_string(),
            container: "tfstate".to_string(),
            key: StateKey::for_env(&env_name),
        },
        approval: ApprovalPolicy::None,
        auto_apply_on_push,
        name: env_name,
    }
}

/// An environment whose mutating stages require reviewer sign-off.
pub fn guarded_environment(name: &str, reviewers: &[&str]) -> Environment {
    let mut env = environment(name, false);
    env.approval = ApprovalPolicy::Required {
        reviewers: NonEmpty::from_vec(reviewers.iter().map(|r| r.to_string()).collect())
            .expect("guarded environment needs at least one reviewer"),
        branch: Some("main".to_string()),
    };
    env
}

/// Terraform settings rooted in a temp directory so plan artifacts never
/// land in the repository.
pub fn settings(working_dir: &std::path::Path) -> TerraformSettings {
    TerraformSettings {
        working_dir: working_dir.to_path_buf(),
        ..TerraformSettings::default()
    }
}
