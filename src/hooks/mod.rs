// ABOUTME: Hooks system for pipeline run lifecycle events.
// ABOUTME: Discovers and executes shell scripts at pre-run, post-run, and on-error points.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::gate::TriggerKind;
use crate::types::{EnvName, Stage, StateKey};

/// Hook execution points in the run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// Before any stage runs. Failure aborts the run.
    PreRun,
    /// After a successful run. Failure logs warning.
    PostRun,
    /// On run failure. Failure logs warning.
    OnError,
}

impl HookPoint {
    /// Get the hook filename for this point.
    pub fn filename(&self) -> &'static str {
        match self {
            HookPoint::PreRun => "pre-run",
            HookPoint::PostRun => "post-run",
            HookPoint::OnError => "on-error",
        }
    }

    /// Whether failure at this hook point should abort the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HookPoint::PreRun)
    }
}

/// Context passed to hooks via environment variables.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub environment: EnvName,
    pub trigger: TriggerKind,
    pub stages: Vec<Stage>,
    pub state_key: StateKey,
}

impl HookContext {
    /// Convert context to environment variables.
    pub fn to_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("TERRAPIN_ENV".to_string(), self.environment.to_string());
        env.insert("TERRAPIN_TRIGGER".to_string(), self.trigger.to_string());
        env.insert(
            "TERRAPIN_STAGES".to_string(),
            self.stages
                .iter()
                .map(|s| s.subcommand())
                .collect::<Vec<_>>()
                .join(" "),
        );
        env.insert("TERRAPIN_STATE_KEY".to_string(), self.state_key.to_string());
        env
    }
}

/// Result of running a hook.
#[derive(Debug)]
pub struct HookResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Discovers and runs hooks from a project directory.
pub struct HookRunner {
    hooks_dir: PathBuf,
}

impl HookRunner {
    /// Create a new hook runner looking for hooks in the given project directory.
    pub fn new(project_dir: &Path) -> Self {
        Self {
            hooks_dir: project_dir.join(".terrapin").join("hooks"),
        }
    }

    /// Check if a hook exists for the given point.
    pub fn hook_exists(&self, point: HookPoint) -> bool {
        self.hook_path(point).is_file()
    }

    /// Get the path to a hook script.
    fn hook_path(&self, point: HookPoint) -> PathBuf {
        self.hooks_dir.join(point.filename())
    }

    /// Run a hook if it exists.
    ///
    /// Returns None if the hook doesn't exist, or Some(HookResult) if it was run.
    pub async fn run(&self, point: HookPoint, context: &HookContext) -> Option<HookResult> {
        let hook_path = self.hook_path(point);

        if !hook_path.is_file() {
            return None;
        }

        tracing::info!("Running {} hook: {}", point.filename(), hook_path.display());

        let env_vars = context.to_env();

        let output = Command::new(&hook_path)
            .envs(&env_vars)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match output {
            Ok(output) => {
                let result = HookResult {
                    success: output.status.success(),
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };

                if result.success {
                    tracing::info!("{} hook completed successfully", point.filename());
                } else {
                    tracing::warn!(
                        "{} hook failed with exit code {:?}",
                        point.filename(),
                        result.exit_code
                    );
                }

                Some(result)
            }
            Err(e) => {
                tracing::error!("Failed to execute {} hook: {}", point.filename(), e);
                Some(HookResult {
                    success: false,
                    exit_code: None,
                    stdout: String::new(),
                    stderr: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> HookContext {
        HookContext {
            environment: EnvName::new("qa").unwrap(),
            trigger: TriggerKind::Manual,
            stages: vec![Stage::Init, Stage::Plan],
            state_key: StateKey::new("qa.tfstate").unwrap(),
        }
    }

    #[test]
    fn hook_point_filenames() {
        assert_eq!(HookPoint::PreRun.filename(), "pre-run");
        assert_eq!(HookPoint::PostRun.filename(), "post-run");
        assert_eq!(HookPoint::OnError.filename(), "on-error");
    }

    #[test]
    fn pre_run_is_fatal() {
        assert!(HookPoint::PreRun.is_fatal());
        assert!(!HookPoint::PostRun.is_fatal());
        assert!(!HookPoint::OnError.is_fatal());
    }

    #[test]
    fn hook_context_to_env() {
        let env = context().to_env();
        assert_eq!(env.get("TERRAPIN_ENV"), Some(&"qa".to_string()));
        assert_eq!(env.get("TERRAPIN_TRIGGER"), Some(&"manual".to_string()));
        assert_eq!(env.get("TERRAPIN_STAGES"), Some(&"init plan".to_string()));
        assert_eq!(
            env.get("TERRAPIN_STATE_KEY"),
            Some(&"qa.tfstate".to_string())
        );
    }

    #[test]
    fn hook_runner_checks_hooks_dir() {
        let runner = HookRunner::new(Path::new("/nonexistent"));
        assert!(!runner.hook_exists(HookPoint::PreRun));
    }
}
