// ABOUTME: Cloud identity handoff for OIDC-federated Terraform runs.
// ABOUTME: Resolves opaque identifiers and exports them as ARM_* variables.

use crate::config::AuthConfig;
use crate::error::Result;
use std::collections::HashMap;

/// The three identifiers the cloud provider needs to federate the CI
/// identity. Opaque to terrapin: no token exchange happens here, the
/// provider chain does that once the variables are in place.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudCredentials {
    client_id: String,
    tenant_id: String,
    subscription_id: String,
}

impl CloudCredentials {
    /// Resolve configured values (literals or env-var references). Fails
    /// only when a referenced variable is absent with no default, which is
    /// an error only for runs that include a cloud-access stage.
    pub fn resolve(config: &AuthConfig) -> Result<Self> {
        Ok(Self {
            client_id: config.client_id.resolve()?,
            tenant_id: config.tenant_id.resolve()?,
            subscription_id: config.subscription_id.resolve()?,
        })
    }

    /// Environment variables for a Terraform invocation that talks to the
    /// cloud provider.
    pub fn to_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("ARM_CLIENT_ID".to_string(), self.client_id.clone());
        env.insert("ARM_TENANT_ID".to_string(), self.tenant_id.clone());
        env.insert(
            "ARM_SUBSCRIPTION_ID".to_string(),
            self.subscription_id.clone(),
        );
        env.insert("ARM_USE_OIDC".to_string(), "true".to_string());
        env
    }
}

// Credentials are supplied as opaque secrets; keep them out of logs.
impl std::fmt::Debug for CloudCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudCredentials")
            .field("client_id", &"<redacted>")
            .field("tenant_id", &"<redacted>")
            .field("subscription_id", &"<redacted>")
            .finish()
    }
}
