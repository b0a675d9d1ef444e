// ABOUTME: Phantom-typed path to a plan artifact.
// ABOUTME: Produced by the plan stage, consumed by apply; keyed per environment.

use super::env_name::EnvName;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Marker type; empty enum prevents instantiation.
pub enum PlanMarker {}

/// Path to the binary plan artifact for one environment, relative to the
/// Terraform working directory (where every stage runs).
///
/// Apply never re-plans: it consumes exactly the artifact the plan stage
/// wrote, so the reviewed changes are the applied changes.
#[must_use = "plan artifacts reference files on disk and should not be ignored"]
pub struct PlanFile {
    path: PathBuf,
    _marker: PhantomData<PlanMarker>,
}

impl PlanFile {
    /// Artifact location for an environment: `.terrapin/plans/<env>.tfplan`.
    pub fn for_env(env: &EnvName) -> Self {
        Self {
            path: PathBuf::from(".terrapin")
                .join("plans")
                .join(format!("{env}.tfplan")),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for PlanFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanFile").field("path", &self.path).finish()
    }
}

impl Clone for PlanFile {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _marker: PhantomData,
        }
    }
}

impl std::fmt::Display for PlanFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path_is_keyed_by_environment() {
        let env = EnvName::new("uat").unwrap();
        let plan = PlanFile::for_env(&env);
        assert_eq!(plan.path(), Path::new(".terrapin/plans/uat.tfplan"));
    }
}
