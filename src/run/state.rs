// ABOUTME: Run lifecycle states and per-stage outcomes.
// ABOUTME: Pending and Finished are typestate markers; Running is the in-flight execute body.

use serde::{Serialize, Serializer};
use std::fmt;

/// Overall run status. A run starts Pending, is Running while execute()
/// is in flight, and ends in exactly one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    /// Every requested stage completed.
    Succeeded,
    /// A stage failed; later requested stages were skipped.
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Succeeded)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Pending => write!(f, "pending"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Why a stage did not execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The stage's flag was off for this run.
    NotRequested,
    /// An earlier stage failed and halted the run.
    PriorFailure,
}

/// What happened to one stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Invoked and exited zero.
    Completed,
    /// Invoked and exited nonzero.
    Failed,
    /// Never invoked.
    Skipped(SkipReason),
}

impl StageOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped(_))
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOutcome::Completed => write!(f, "completed"),
            StageOutcome::Failed => write!(f, "failed"),
            StageOutcome::Skipped(SkipReason::NotRequested) => write!(f, "skipped"),
            StageOutcome::Skipped(SkipReason::PriorFailure) => {
                write!(f, "skipped (after failure)")
            }
        }
    }
}

impl Serialize for StageOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            StageOutcome::Completed => "completed",
            StageOutcome::Failed => "failed",
            StageOutcome::Skipped(SkipReason::NotRequested) => "skipped",
            StageOutcome::Skipped(SkipReason::PriorFailure) => "skipped_after_failure",
        };
        serializer.serialize_str(value)
    }
}

/// Initial state: flags gated, nothing executed.
/// Available actions: `execute()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Terminal state: all stage outcomes recorded.
/// Available actions: `report()`, `into_report()`
#[derive(Debug)]
pub struct Finished {
    pub(crate) report: super::RunReport,
}
