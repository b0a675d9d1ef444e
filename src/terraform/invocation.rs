// ABOUTME: Builds the argv and environment for one Terraform stage invocation.
// ABOUTME: Backend coordinates, var files, and plan artifacts are wired here.

use crate::auth::CloudCredentials;
use crate::config::{Environment, TerraformSettings};
use crate::types::{PlanFile, Stage};
use std::collections::HashMap;
use std::path::PathBuf;

/// One fully-specified CLI invocation: what to run, where, and with what
/// environment. The executor runs it verbatim.
#[derive(Debug, Clone)]
pub struct StageInvocation {
    pub stage: Stage,
    pub working_dir: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
}

impl StageInvocation {
    pub fn build(
        stage: Stage,
        settings: &TerraformSettings,
        environment: &Environment,
        credentials: Option<&CloudCredentials>,
    ) -> Self {
        let tfvars = environment.tfvars.display().to_string();
        let plan = PlanFile::for_env(&environment.name);

        let mut args: Vec<String> = vec![stage.subcommand().to_string()];
        match stage {
            Stage::Init => {
                args.push("-input=false".to_string());
                args.push("-no-color".to_string());
                args.extend(environment.backend.backend_config_args());
            }
            Stage::Fmt => {
                args.push("-check".to_string());
                args.push("-recursive".to_string());
                args.push("-no-color".to_string());
            }
            Stage::Validate => {
                args.push("-no-color".to_string());
            }
            Stage::Plan => {
                args.push("-input=false".to_string());
                args.push("-no-color".to_string());
                args.push(format!("-var-file={tfvars}"));
                args.push(format!("-out={plan}"));
            }
            Stage::Apply => {
                args.push("-input=false".to_string());
                args.push("-no-color".to_string());
                args.push("-auto-approve".to_string());
                args.push(plan.to_string());
            }
            Stage::Destroy => {
                args.push("-input=false".to_string());
                args.push("-no-color".to_string());
                args.push("-auto-approve".to_string());
                args.push(format!("-var-file={tfvars}"));
            }
        }

        let mut env = HashMap::new();
        if stage.requires_cloud_access()
            && let Some(credentials) = credentials
        {
            env.extend(credentials.to_env());
        }

        Self {
            stage,
            working_dir: settings.working_dir.clone(),
            args,
            env,
        }
    }
}
