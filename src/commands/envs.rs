// ABOUTME: Envs command implementation.
// ABOUTME: Lists registered environments with backend keys and approval policies.

use crate::config::{ApprovalPolicy, Config};
use crate::error::Result;
use crate::output::{Output, OutputMode};
use crate::registry::EnvironmentRegistry;
use serde::Serialize;

#[derive(Serialize)]
struct EnvSummary {
    name: String,
    state_key: String,
    auto_apply_on_push: bool,
    approval_required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reviewers: Vec<String>,
}

pub fn list_environments(config: &Config, output: &Output) -> Result<()> {
    let registry = EnvironmentRegistry::from_config(config)?;

    let mut summaries = Vec::with_capacity(registry.len());
    for name in registry.names() {
        let env = registry.resolve(&name)?;
        let (approval_required, reviewers) = match &env.approval {
            ApprovalPolicy::None => (false, Vec::new()),
            ApprovalPolicy::Required { reviewers, .. } => {
                (true, reviewers.iter().cloned().collect())
            }
        };
        summaries.push(EnvSummary {
            name,
            state_key: env.backend.key.to_string(),
            auto_apply_on_push: env.auto_apply_on_push,
            approval_required,
            reviewers,
        });
    }

    if output.mode() == OutputMode::Json {
        output.emit_json(&summaries);
        return Ok(());
    }

    for summary in &summaries {
        let mut line = format!("{:<12} key={}", summary.name, summary.state_key);
        if summary.auto_apply_on_push {
            line.push_str("  auto-apply-on-push");
        }
        if summary.approval_required {
            line.push_str(&format!("  approval: {}", summary.reviewers.join(", ")));
        }
        println!("{line}");
    }

    Ok(())
}
