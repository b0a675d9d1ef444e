// ABOUTME: Remote state object key for one environment's Terraform state.
// ABOUTME: Defaults to "<env>.tfstate"; validated so it names a single blob.

use super::env_name::EnvName;
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateKeyError {
    #[error("state key cannot be empty")]
    Empty,

    #[error("state key cannot contain whitespace")]
    Whitespace,

    #[error("state key cannot start with '/'")]
    LeadingSlash,
}

/// The blob name under which one environment's state lives in the backend
/// container. Each environment owns exactly one key; runs for different
/// environments never share state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(value: &str) -> Result<Self, StateKeyError> {
        if value.is_empty() {
            return Err(StateKeyError::Empty);
        }

        if value.chars().any(char::is_whitespace) {
            return Err(StateKeyError::Whitespace);
        }

        if value.starts_with('/') {
            return Err(StateKeyError::LeadingSlash);
        }

        Ok(Self(value.to_string()))
    }

    /// The conventional key for an environment: `<env>.tfstate`.
    pub fn for_env(env: &EnvName) -> Self {
        Self(format!("{env}.tfstate"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for StateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        StateKey::new(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_env_appends_tfstate_suffix() {
        let env = EnvName::new("dev").unwrap();
        assert_eq!(StateKey::for_env(&env).as_str(), "dev.tfstate");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(StateKey::new("").is_err());
        assert!(StateKey::new("my state").is_err());
    }

    #[test]
    fn rejects_leading_slash() {
        assert!(StateKey::new("/prod.tfstate").is_err());
    }

    #[test]
    fn accepts_nested_key() {
        let key = StateKey::new("platform/prod.tfstate").unwrap();
        assert_eq!(key.as_str(), "platform/prod.tfstate");
    }
}
