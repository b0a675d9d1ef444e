// ABOUTME: Diagnostics accumulator for non-fatal warnings during pipeline runs.
// ABOUTME: Internally synchronized so concurrent environment runs can share one.

use parking_lot::Mutex;

/// Collects non-fatal warnings during run operations. Runs for different
/// environments execute concurrently and report into the same accumulator.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Mutex<Vec<Warning>>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.lock().push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().clone()
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.lock().is_empty()
    }
}

/// A non-fatal warning collected during a pipeline run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A post-run or on-error hook failed.
    pub fn hook_failure(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::HookFailure,
            message: message.into(),
        }
    }

    /// A stale plan artifact could not be removed.
    pub fn plan_artifact(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::PlanArtifact,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A non-fatal hook returned nonzero.
    HookFailure,
    /// Plan artifact housekeeping failed (file may remain on disk).
    PlanArtifact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let diag = Diagnostics::default();

        diag.warn(Warning::hook_failure("post-run hook exited 1"));
        diag.warn(Warning::plan_artifact("could not remove dev.tfplan"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn warning_constructors_set_correct_kind() {
        let hook = Warning::hook_failure("test");
        assert_eq!(hook.kind, WarningKind::HookFailure);

        let plan = Warning::plan_artifact("test");
        assert_eq!(plan.kind, WarningKind::PlanArtifact);
    }
}
