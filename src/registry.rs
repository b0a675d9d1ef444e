// ABOUTME: Immutable environment name -> Environment lookup.
// ABOUTME: Built once from configuration; pure mapping, no run-time mutation.

use crate::config::{Config, Environment};
use crate::error::Result;
use crate::types::EnvName;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("environment '{name}' is not registered (known: {known})")]
pub struct RegistryError {
    pub name: String,
    pub known: String,
}

/// Maps environment names to their resolved records. Lookups never mutate;
/// the registry is fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct EnvironmentRegistry {
    environments: HashMap<EnvName, Environment>,
}

impl EnvironmentRegistry {
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut environments = HashMap::new();

        for (name, raw) in &config.environments {
            let env_name = EnvName::new(name)
                .map_err(|e| crate::error::Error::InvalidConfig(format!("environment '{name}': {e}")))?;
            let environment = raw.resolve(env_name.clone())?;
            environments.insert(env_name, environment);
        }

        Ok(Self { environments })
    }

    pub fn resolve(&self, name: &str) -> std::result::Result<&Environment, RegistryError> {
        EnvName::new(name)
            .ok()
            .and_then(|n| self.environments.get(&n))
            .ok_or_else(|| RegistryError {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    /// Registered environment names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.environments.keys().map(|n| n.to_string()).collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Environment> {
        self.environments.values()
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}
