// ABOUTME: Per-stage boolean flags for one pipeline run.
// ABOUTME: Deserializable so manual-dispatch defaults can live in configuration.

use crate::types::Stage;
use serde::{Deserialize, Serialize};

/// Six independent booleans, one per lifecycle stage.
///
/// The `Default` impl is the shipped manual-dispatch policy: verify and
/// plan, never mutate. Projects override it via `dispatch_defaults` in
/// terrapin.yml.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageFlags {
    pub init: bool,
    pub fmt: bool,
    pub validate: bool,
    pub plan: bool,
    pub apply: bool,
    pub destroy: bool,
}

impl Default for StageFlags {
    fn default() -> Self {
        Self::through_plan()
    }
}

impl StageFlags {
    pub fn all() -> Self {
        Self {
            init: true,
            fmt: true,
            validate: true,
            plan: true,
            apply: true,
            destroy: true,
        }
    }

    pub fn none() -> Self {
        Self {
            init: false,
            fmt: false,
            validate: false,
            plan: false,
            apply: false,
            destroy: false,
        }
    }

    /// Everything up to and including plan; no mutating stages.
    pub fn through_plan() -> Self {
        Self {
            init: true,
            fmt: true,
            validate: true,
            plan: true,
            apply: false,
            destroy: false,
        }
    }

    pub fn enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Init => self.init,
            Stage::Fmt => self.fmt,
            Stage::Validate => self.validate,
            Stage::Plan => self.plan,
            Stage::Apply => self.apply,
            Stage::Destroy => self.destroy,
        }
    }

    pub fn set(&mut self, stage: Stage, on: bool) {
        match stage {
            Stage::Init => self.init = on,
            Stage::Fmt => self.fmt = on,
            Stage::Validate => self.validate = on,
            Stage::Plan => self.plan = on,
            Stage::Apply => self.apply = on,
            Stage::Destroy => self.destroy = on,
        }
    }

    /// Enabled stages in execution order.
    pub fn enabled_stages(&self) -> impl Iterator<Item = Stage> + '_ {
        Stage::ORDER.into_iter().filter(|s| self.enabled(*s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_verify_and_plan_only() {
        let flags = StageFlags::default();
        assert!(flags.init && flags.fmt && flags.validate && flags.plan);
        assert!(!flags.apply && !flags.destroy);
    }

    #[test]
    fn enabled_stages_follow_execution_order() {
        let flags = StageFlags {
            fmt: false,
            ..StageFlags::all()
        };

        let stages: Vec<Stage> = flags.enabled_stages().collect();
        assert_eq!(
            stages,
            vec![
                Stage::Init,
                Stage::Validate,
                Stage::Plan,
                Stage::Apply,
                Stage::Destroy
            ]
        );
    }

    #[test]
    fn set_toggles_a_single_stage() {
        let mut flags = StageFlags::none();
        flags.set(Stage::Destroy, true);
        assert!(flags.destroy);
        assert!(!flags.apply);
    }
}
