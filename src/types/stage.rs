// ABOUTME: The six Terraform lifecycle stages and their fixed execution order.
// ABOUTME: Stage names match the CLI subcommands they delegate to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One lifecycle operation delegated to the Terraform CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Init,
    Fmt,
    Validate,
    Plan,
    Apply,
    Destroy,
}

impl Stage {
    /// Fixed topological order. Later stages depend on artifacts of earlier
    /// ones: init prepares the working directory, plan writes the artifact
    /// apply consumes.
    pub const ORDER: [Stage; 6] = [
        Stage::Init,
        Stage::Fmt,
        Stage::Validate,
        Stage::Plan,
        Stage::Apply,
        Stage::Destroy,
    ];

    /// The Terraform subcommand this stage invokes.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Fmt => "fmt",
            Stage::Validate => "validate",
            Stage::Plan => "plan",
            Stage::Apply => "apply",
            Stage::Destroy => "destroy",
        }
    }

    /// Whether this stage talks to the cloud provider and therefore needs
    /// credentials handed over before invocation. fmt and validate operate
    /// purely on local files.
    pub fn requires_cloud_access(&self) -> bool {
        !matches!(self, Stage::Fmt | Stage::Validate)
    }

    /// Whether this stage writes the plan artifact.
    pub fn produces_plan(&self) -> bool {
        matches!(self, Stage::Plan)
    }

    /// Whether this stage consumes a previously written plan artifact.
    pub fn consumes_plan(&self) -> bool {
        matches!(self, Stage::Apply)
    }

    /// Whether this stage mutates real infrastructure. Mutating stages sit
    /// behind the environment's approval gate.
    pub fn mutates_infrastructure(&self) -> bool {
        matches!(self, Stage::Apply | Stage::Destroy)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subcommand())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Stage::Init),
            "fmt" => Ok(Stage::Fmt),
            "validate" => Ok(Stage::Validate),
            "plan" => Ok(Stage::Plan),
            "apply" => Ok(Stage::Apply),
            "destroy" => Ok(Stage::Destroy),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_puts_plan_before_apply() {
        let plan_pos = Stage::ORDER.iter().position(|s| *s == Stage::Plan);
        let apply_pos = Stage::ORDER.iter().position(|s| *s == Stage::Apply);
        assert!(plan_pos < apply_pos);
    }

    #[test]
    fn local_stages_need_no_credentials() {
        assert!(!Stage::Fmt.requires_cloud_access());
        assert!(!Stage::Validate.requires_cloud_access());
        assert!(Stage::Init.requires_cloud_access());
        assert!(Stage::Apply.requires_cloud_access());
    }

    #[test]
    fn mutating_stages_are_apply_and_destroy() {
        let mutating: Vec<Stage> = Stage::ORDER
            .into_iter()
            .filter(Stage::mutates_infrastructure)
            .collect();
        assert_eq!(mutating, vec![Stage::Apply, Stage::Destroy]);
    }

    #[test]
    fn stage_parses_from_subcommand_name() {
        for stage in Stage::ORDER {
            assert_eq!(stage.subcommand().parse::<Stage>().unwrap(), stage);
        }
    }
}
