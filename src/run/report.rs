// ABOUTME: Per-run and per-stage execution records.
// ABOUTME: JSON-serializable so CI systems can consume run results.

use super::state::{RunStatus, StageOutcome};
use crate::gate::{StageFlags, TriggerKind};
use crate::types::Stage;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened to one stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub duration_ms: u64,
    /// The external tool's diagnostic output, unmodified. Present only for
    /// failed stages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// The full record of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub environment: String,
    pub trigger: TriggerKind,
    pub flags: StageFlags,
    pub status: RunStatus,
    /// One entry per stage, in execution order.
    pub stages: Vec<StageReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Machine the run executed on.
    pub host: String,
}

impl RunReport {
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// The stage that halted the run, if any. Best-effort failures do not
    /// halt and are not returned here.
    pub fn halting_stage(&self) -> Option<Stage> {
        if self.status != RunStatus::Failed {
            return None;
        }
        self.stages
            .iter()
            .rev()
            .find(|s| s.outcome.is_failed())
            .map(|s| s.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::SkipReason;

    fn report(status: RunStatus, stages: Vec<(Stage, StageOutcome)>) -> RunReport {
        RunReport {
            environment: "dev".to_string(),
            trigger: TriggerKind::Manual,
            flags: StageFlags::default(),
            status,
            stages: stages
                .into_iter()
                .map(|(stage, outcome)| StageReport {
                    stage,
                    outcome,
                    duration_ms: 0,
                    diagnostic: None,
                })
                .collect(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            host: "ci-runner".to_string(),
        }
    }

    #[test]
    fn halting_stage_is_the_last_failed_one() {
        let report = report(
            RunStatus::Failed,
            vec![
                (Stage::Init, StageOutcome::Completed),
                (Stage::Fmt, StageOutcome::Failed),
                (Stage::Validate, StageOutcome::Failed),
                (Stage::Plan, StageOutcome::Skipped(SkipReason::PriorFailure)),
            ],
        );
        assert_eq!(report.halting_stage(), Some(Stage::Validate));
    }

    #[test]
    fn succeeded_run_has_no_halting_stage() {
        let report = report(
            RunStatus::Succeeded,
            vec![
                (Stage::Init, StageOutcome::Completed),
                (Stage::Fmt, StageOutcome::Failed),
            ],
        );
        assert_eq!(report.halting_stage(), None);
    }

    #[test]
    fn report_serializes_skip_reasons_distinctly() {
        let report = report(
            RunStatus::Failed,
            vec![
                (Stage::Plan, StageOutcome::Skipped(SkipReason::NotRequested)),
                (Stage::Apply, StageOutcome::Skipped(SkipReason::PriorFailure)),
            ],
        );

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"skipped\""));
        assert!(json.contains("\"skipped_after_failure\""));
    }
}
