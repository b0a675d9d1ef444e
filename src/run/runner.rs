// ABOUTME: Typestate pipeline run: gated flags in, per-stage outcomes out.
// ABOUTME: Stages run strictly in order; first halting failure skips the rest.

use super::error::RunError;
use super::report::{RunReport, StageReport};
use super::state::{Finished, Pending, RunStatus, SkipReason, StageOutcome};
use crate::auth::CloudCredentials;
use crate::config::{Environment, TerraformSettings};
use crate::gate::{EffectiveFlags, TriggerKind};
use crate::terraform::{StageInvocation, TerraformRunner};
use crate::types::{PlanFile, Stage};
use chrono::Utc;
use std::time::Instant;

/// Whether the environment's approval gate was satisfied upstream.
///
/// terrapin does not implement approval; the CI system does. This is the
/// external fact the caller hands over, asserted before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    NotRequested,
    Granted { by: String },
}

impl Approval {
    pub fn granted(by: impl Into<String>) -> Self {
        Approval::Granted { by: by.into() }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Approval::Granted { .. })
    }
}

/// Everything a run needs besides the environment itself.
pub struct RunContext<'a> {
    pub terraform: &'a TerraformSettings,
    /// Present when any enabled stage needs cloud access.
    pub credentials: Option<CloudCredentials>,
    /// Stages whose failure is recorded but does not halt the run.
    pub best_effort: &'a [Stage],
}

impl RunContext<'_> {
    fn halts_on_failure(&self, stage: Stage) -> bool {
        !self.best_effort.contains(&stage)
    }
}

/// One pipeline run, parameterized by its lifecycle state.
#[derive(Debug)]
pub struct PipelineRun<S> {
    environment: Environment,
    trigger: TriggerKind,
    flags: EffectiveFlags,
    approval: Approval,
    state: S,
}

impl PipelineRun<Pending> {
    /// Requires gated flags: there is no way to construct a run whose
    /// stage set bypassed the gate.
    pub fn new(
        environment: Environment,
        trigger: TriggerKind,
        flags: EffectiveFlags,
        approval: Approval,
    ) -> Self {
        Self {
            environment,
            trigger,
            flags,
            approval,
            state: Pending,
        }
    }

    /// Run the enabled stages in order against the executor.
    ///
    /// A nonzero stage exit marks the stage Failed and (unless the stage
    /// is best-effort) skips everything after it; the run finishes Failed.
    /// `Err` is reserved for conditions where no meaningful report exists:
    /// an unsatisfied approval precondition or an executor fault.
    pub async fn execute<R: TerraformRunner>(
        self,
        executor: &R,
        ctx: &RunContext<'_>,
    ) -> Result<PipelineRun<Finished>, RunError> {
        self.assert_approval()?;

        let started_at = Utc::now();
        let mut stages = Vec::with_capacity(Stage::ORDER.len());
        let mut halted = false;

        for stage in Stage::ORDER {
            if !self.flags.enabled(stage) {
                stages.push(StageReport {
                    stage,
                    outcome: StageOutcome::Skipped(SkipReason::NotRequested),
                    duration_ms: 0,
                    diagnostic: None,
                });
                continue;
            }

            if halted {
                tracing::debug!(%stage, "skipping after earlier failure");
                stages.push(StageReport {
                    stage,
                    outcome: StageOutcome::Skipped(SkipReason::PriorFailure),
                    duration_ms: 0,
                    diagnostic: None,
                });
                continue;
            }

            if stage.produces_plan() {
                self.prepare_plan_dir(ctx)?;
            }

            let invocation = StageInvocation::build(
                stage,
                ctx.terraform,
                &self.environment,
                ctx.credentials.as_ref(),
            );

            let clock = Instant::now();
            let output = executor.run_stage(&invocation).await?;
            let duration_ms = clock.elapsed().as_millis() as u64;

            if output.success() {
                tracing::info!(%stage, duration_ms, "stage completed");
                stages.push(StageReport {
                    stage,
                    outcome: StageOutcome::Completed,
                    duration_ms,
                    diagnostic: None,
                });
            } else {
                let diagnostic = output.diagnostic().to_string();
                if ctx.halts_on_failure(stage) {
                    tracing::error!(%stage, "stage failed; halting run");
                    halted = true;
                } else {
                    tracing::warn!(%stage, "best-effort stage failed; continuing");
                }
                stages.push(StageReport {
                    stage,
                    outcome: StageOutcome::Failed,
                    duration_ms,
                    diagnostic: Some(diagnostic),
                });
            }
        }

        let status = if halted {
            RunStatus::Failed
        } else {
            RunStatus::Succeeded
        };

        let report = RunReport {
            environment: self.environment.name.to_string(),
            trigger: self.trigger,
            flags: self.flags.flags(),
            status,
            stages,
            started_at,
            finished_at: Utc::now(),
            host: gethostname::gethostname().to_string_lossy().into_owned(),
        };

        Ok(PipelineRun {
            environment: self.environment,
            trigger: self.trigger,
            flags: self.flags,
            approval: self.approval,
            state: Finished { report },
        })
    }

    /// Mutating stages require the upstream approval gate to have been
    /// satisfied. Asserted once, up front: when the precondition is known
    /// unmet there is no point running the verification stages first.
    fn assert_approval(&self) -> Result<(), RunError> {
        if !self.environment.approval.requires_approval() || self.approval.is_granted() {
            return Ok(());
        }

        let Some(stage) = Stage::ORDER
            .into_iter()
            .find(|s| s.mutates_infrastructure() && self.flags.enabled(*s))
        else {
            return Ok(());
        };

        let reviewers = match &self.environment.approval {
            crate::config::ApprovalPolicy::Required { reviewers, .. } => {
                reviewers.iter().cloned().collect::<Vec<_>>().join(", ")
            }
            crate::config::ApprovalPolicy::None => String::new(),
        };

        Err(RunError::ApprovalNotSatisfied {
            environment: self.environment.name.to_string(),
            stage,
            reviewers,
        })
    }

    fn prepare_plan_dir(&self, ctx: &RunContext<'_>) -> Result<(), RunError> {
        let plan = PlanFile::for_env(&self.environment.name);
        let dir = ctx.terraform.working_dir.join(
            plan.path()
                .parent()
                .expect("plan path always has a parent directory"),
        );
        std::fs::create_dir_all(&dir).map_err(|source| RunError::PlanDir { source })
    }
}

impl<S> PipelineRun<S> {
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn trigger(&self) -> TriggerKind {
        self.trigger
    }

    pub fn approval(&self) -> &Approval {
        &self.approval
    }
}

impl PipelineRun<Finished> {
    pub fn report(&self) -> &RunReport {
        &self.state.report
    }

    pub fn into_report(self) -> RunReport {
        self.state.report
    }

    pub fn succeeded(&self) -> bool {
        self.state.report.status.is_success()
    }
}
