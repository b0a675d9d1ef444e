// ABOUTME: Stage gating: decides which lifecycle stages a run may execute.
// ABOUTME: Pure decision logic over trigger kind, environment policy, and requested flags.

mod flags;
mod trigger;

pub use flags::StageFlags;
pub use trigger::TriggerKind;

use crate::config::Environment;
use crate::types::Stage;
use thiserror::Error;

/// Rejected flag combinations. These are caller mistakes, reported before
/// any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("apply requested without plan: apply consumes the artifact plan produces")]
    ApplyWithoutPlan,

    #[error("apply and destroy cannot both be requested in one run")]
    ApplyAndDestroy,
}

/// Stage flags that have passed through the gate.
///
/// Only this module can construct one, so a pipeline run can require gated
/// flags in its signature and the flag invariants hold by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveFlags(StageFlags);

impl EffectiveFlags {
    pub fn flags(&self) -> StageFlags {
        self.0
    }

    pub fn enabled(&self, stage: Stage) -> bool {
        self.0.enabled(stage)
    }
}

/// Decides the effective stage set for one run.
///
/// Push runs carry no user input: the verification stages always run,
/// destroy never does, and apply runs only when the environment opts in
/// (`auto_apply_on_push`, the production posture). Manual runs pass the
/// requested flags through unchanged.
pub struct StageGate;

impl StageGate {
    pub fn effective(
        trigger: TriggerKind,
        environment: &Environment,
        requested: StageFlags,
    ) -> Result<EffectiveFlags, GateError> {
        if requested.apply && !requested.plan {
            return Err(GateError::ApplyWithoutPlan);
        }

        if requested.apply && requested.destroy {
            return Err(GateError::ApplyAndDestroy);
        }

        let effective = match trigger {
            TriggerKind::Push => StageFlags {
                init: true,
                fmt: true,
                validate: true,
                plan: true,
                apply: environment.auto_apply_on_push,
                destroy: false,
            },
            TriggerKind::Manual => requested,
        };

        Ok(EffectiveFlags(effective))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::types::EnvName;

    fn env(name: &str, auto_apply: bool) -> Environment {
        Environment::for_tests(EnvName::new(name).unwrap(), auto_apply)
    }

    #[test]
    fn push_on_plain_environment_never_applies() {
        let flags =
            StageGate::effective(TriggerKind::Push, &env("dev", false), StageFlags::all()).unwrap();

        assert!(flags.enabled(Stage::Init));
        assert!(flags.enabled(Stage::Fmt));
        assert!(flags.enabled(Stage::Validate));
        assert!(flags.enabled(Stage::Plan));
        assert!(!flags.enabled(Stage::Apply));
        assert!(!flags.enabled(Stage::Destroy));
    }

    #[test]
    fn push_on_auto_apply_environment_forces_apply() {
        let flags =
            StageGate::effective(TriggerKind::Push, &env("prod", true), StageFlags::none())
                .unwrap();

        assert!(flags.enabled(Stage::Plan));
        assert!(flags.enabled(Stage::Apply));
        assert!(!flags.enabled(Stage::Destroy));
    }

    #[test]
    fn manual_flags_pass_through_unchanged() {
        let requested = StageFlags {
            init: true,
            fmt: false,
            validate: true,
            plan: true,
            apply: true,
            destroy: false,
        };

        let flags =
            StageGate::effective(TriggerKind::Manual, &env("qa", false), requested).unwrap();
        assert_eq!(flags.flags(), requested);
    }

    #[test]
    fn apply_without_plan_is_rejected() {
        let requested = StageFlags {
            plan: false,
            apply: true,
            ..StageFlags::none()
        };

        let err =
            StageGate::effective(TriggerKind::Manual, &env("qa", false), requested).unwrap_err();
        assert_eq!(err, GateError::ApplyWithoutPlan);
    }

    #[test]
    fn apply_and_destroy_together_are_rejected() {
        let requested = StageFlags {
            plan: true,
            apply: true,
            destroy: true,
            ..StageFlags::none()
        };

        let err =
            StageGate::effective(TriggerKind::Manual, &env("dev", false), requested).unwrap_err();
        assert_eq!(err, GateError::ApplyAndDestroy);
    }
}
