// ABOUTME: How a pipeline run was initiated.
// ABOUTME: Push runs are fully policy-driven; manual runs carry user input.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Automatic run from a branch push. No user input; stage flags are
    /// derived from environment policy.
    Push,
    /// Operator-initiated run. Requested flags pass through the gate
    /// unchanged.
    Manual,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Push => write!(f, "push"),
            TriggerKind::Manual => write!(f, "manual"),
        }
    }
}
