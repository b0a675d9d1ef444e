// ABOUTME: Run command implementation.
// ABOUTME: Wires config, registry, gate, hooks, and the pipeline runner together.

use crate::auth::CloudCredentials;
use crate::config::{Config, Environment};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::gate::{EffectiveFlags, StageFlags, StageGate, TriggerKind};
use crate::hooks::{HookContext, HookPoint, HookRunner};
use crate::output::{Output, OutputMode};
use crate::registry::EnvironmentRegistry;
use crate::run::{Approval, PipelineRun, RunContext, RunReport};
use crate::terraform::{TerraformCli, detect_terraform};
use crate::types::Stage;
use std::env;

/// What the caller asked for, before gating.
pub struct RunRequest {
    pub trigger: TriggerKind,
    pub requested: StageFlags,
    pub approval: Approval,
}

/// Which environments to run.
pub enum RunTarget {
    Environment(String),
    /// Every registered environment, concurrently. Environments own
    /// disjoint state keys, so their runs are independent.
    All,
}

pub async fn run(
    config: &Config,
    target: RunTarget,
    request: RunRequest,
    output: &Output,
) -> Result<()> {
    let registry = EnvironmentRegistry::from_config(config)?;
    let diag = Diagnostics::default();

    let names = match &target {
        RunTarget::Environment(name) => vec![name.clone()],
        RunTarget::All => registry.names(),
    };

    // Gate every environment up front so configuration errors surface
    // before any stage runs anywhere.
    let mut gated: Vec<(Environment, EffectiveFlags)> = Vec::with_capacity(names.len());
    for name in &names {
        let environment = registry.resolve(name)?.clone();
        let flags = StageGate::effective(request.trigger, &environment, request.requested)?;
        gated.push((environment, flags));
    }

    let needs_cloud = gated.iter().any(|(_, flags)| {
        Stage::ORDER
            .iter()
            .any(|s| flags.enabled(*s) && s.requires_cloud_access())
    });
    let credentials = if needs_cloud {
        Some(CloudCredentials::resolve(&config.auth)?)
    } else {
        None
    };

    let info = detect_terraform(&config.terraform.binary).await?;
    output.progress(&format!("Using {}", info.version));

    let executor = TerraformCli::new(&config.terraform.binary, config.terraform.stage_timeout);
    let hook_runner = HookRunner::new(&env::current_dir()?);
    let multi = gated.len() > 1;

    let runs = gated.into_iter().map(|(environment, flags)| {
        run_environment(
            config,
            environment,
            flags,
            &request,
            credentials.clone(),
            &executor,
            &hook_runner,
            &diag,
            output,
        )
    });
    let results = futures::future::join_all(runs).await;

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    let mut first_error = None;
    for result in results {
        match result {
            Ok(report) if !report.status.is_success() => {
                let stage = report.halting_stage().unwrap_or(Stage::Init);
                if multi {
                    output.error(&format!(
                        "run for '{}' failed at stage '{stage}'",
                        report.environment
                    ));
                }
                if first_error.is_none() {
                    first_error = Some(Error::RunFailed { stage });
                }
            }
            Ok(_) => {}
            Err(e) => {
                if multi {
                    output.error(&e.to_string());
                }
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            output.success("All requested stages completed");
            Ok(())
        }
    }
}

/// Run one environment's pipeline, bracketed by its hooks.
#[allow(clippy::too_many_arguments)]
async fn run_environment(
    config: &Config,
    environment: Environment,
    flags: EffectiveFlags,
    request: &RunRequest,
    credentials: Option<CloudCredentials>,
    executor: &TerraformCli,
    hooks: &HookRunner,
    diag: &Diagnostics,
    output: &Output,
) -> Result<RunReport> {
    let hook_context = HookContext {
        environment: environment.name.clone(),
        trigger: request.trigger,
        stages: flags.flags().enabled_stages().collect(),
        state_key: environment.backend.key.clone(),
    };

    if let Some(result) = hooks.run(HookPoint::PreRun, &hook_context).await
        && !result.success
    {
        return Err(Error::Hook(format!(
            "pre-run hook failed for '{}': {}",
            environment.name,
            result.stderr.trim()
        )));
    }

    output.progress(&format!(
        "Running pipeline for '{}' ({} trigger)",
        environment.name, request.trigger
    ));

    let ctx = RunContext {
        terraform: &config.terraform,
        credentials,
        best_effort: &config.best_effort,
    };

    let run = PipelineRun::new(
        environment,
        request.trigger,
        flags,
        request.approval.clone(),
    );

    let finished = match run.execute(executor, &ctx).await {
        Ok(finished) => finished,
        Err(e) => {
            if let Some(result) = hooks.run(HookPoint::OnError, &hook_context).await
                && !result.success
            {
                diag.warn(Warning::hook_failure(format!(
                    "on-error hook failed for '{}'",
                    hook_context.environment
                )));
            }
            return Err(e.into());
        }
    };

    let report = finished.into_report();
    render_report(&report, output);

    let follow_up = if report.status.is_success() {
        HookPoint::PostRun
    } else {
        HookPoint::OnError
    };
    if let Some(result) = hooks.run(follow_up, &hook_context).await
        && !result.success
    {
        diag.warn(Warning::hook_failure(format!(
            "{} hook failed for '{}'",
            follow_up.filename(),
            report.environment
        )));
    }

    Ok(report)
}

fn render_report(report: &RunReport, output: &Output) {
    if output.mode() == OutputMode::Json {
        output.emit_json(report);
        return;
    }

    output.progress(&format!(
        "Run for '{}' ({}): {}",
        report.environment, report.trigger, report.status
    ));

    for stage in &report.stages {
        let mut line = format!("  {:<9} {}", stage.stage.to_string(), stage.outcome);
        if !stage.outcome.is_skipped() {
            line.push_str(&format!(" ({:.1}s)", stage.duration_ms as f64 / 1000.0));
        }
        output.progress(&line);

        if let Some(diagnostic) = &stage.diagnostic {
            for diag_line in diagnostic.lines() {
                output.progress(&format!("    {diag_line}"));
            }
        }
    }
}
