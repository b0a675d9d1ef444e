// ABOUTME: Approval policy for mutating stages (apply/destroy).
// ABOUTME: The reviewer sign-off itself happens in the CI system, not here.

use nonempty::NonEmpty;
use serde::Deserialize;

/// Raw approval section as written in terrapin.yml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalConfig {
    #[serde(default)]
    pub required: bool,

    /// Reviewers who may satisfy the gate, in escalation order.
    #[serde(default)]
    pub reviewers: Vec<String>,

    /// Branch the mutating stages may run from, if restricted.
    #[serde(default)]
    pub branch: Option<String>,
}

/// Resolved approval policy for an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalPolicy {
    /// Mutating stages run without sign-off.
    None,
    /// Mutating stages require a reviewer to have signed off upstream.
    Required {
        reviewers: NonEmpty<String>,
        branch: Option<String>,
    },
}

impl ApprovalPolicy {
    pub fn requires_approval(&self) -> bool {
        matches!(self, ApprovalPolicy::Required { .. })
    }

    /// Resolve the raw config; a required policy must name at least one
    /// reviewer.
    pub fn resolve(config: Option<&ApprovalConfig>) -> Result<Self, String> {
        let Some(config) = config else {
            return Ok(ApprovalPolicy::None);
        };

        if !config.required {
            return Ok(ApprovalPolicy::None);
        }

        let reviewers = NonEmpty::from_vec(config.reviewers.clone())
            .ok_or_else(|| "approval requires at least one reviewer".to_string())?;

        Ok(ApprovalPolicy::Required {
            reviewers,
            branch: config.branch.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_section_means_no_approval() {
        assert_eq!(ApprovalPolicy::resolve(None).unwrap(), ApprovalPolicy::None);
    }

    #[test]
    fn required_without_reviewers_is_an_error() {
        let config = ApprovalConfig {
            required: true,
            reviewers: vec![],
            branch: None,
        };
        assert!(ApprovalPolicy::resolve(Some(&config)).is_err());
    }

    #[test]
    fn required_keeps_reviewer_order() {
        let config = ApprovalConfig {
            required: true,
            reviewers: vec!["alice".to_string(), "bob".to_string()],
            branch: Some("main".to_string()),
        };

        match ApprovalPolicy::resolve(Some(&config)).unwrap() {
            ApprovalPolicy::Required { reviewers, branch } => {
                assert_eq!(reviewers.first().as_str(), "alice");
                assert_eq!(reviewers.len(), 2);
                assert_eq!(branch.as_deref(), Some("main"));
            }
            ApprovalPolicy::None => panic!("expected required policy"),
        }
    }
}
