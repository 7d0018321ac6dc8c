//! Identity-provider configuration.

use serde::{Deserialize, Serialize};

/// Federated identity-provider (SAML) configuration.
///
/// `login_url`, `entity_id`, and `certificate` are required for startup;
/// see [`crate::config::AppConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdpConfig {
    /// Identity-provider SSO login URL the gateway redirects to.
    #[serde(default)]
    pub login_url: String,
    /// Partner/entity identifier registered with the provider.
    #[serde(default)]
    pub entity_id: String,
    /// Identity-provider X.509 certificate (PEM body, no armor lines).
    #[serde(default)]
    pub certificate: String,
    /// Assertion-consumer-service URL advertised in the AuthnRequest.
    #[serde(default)]
    pub acs_url: String,
    /// Tolerated clock skew when checking assertion validity windows.
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: i64,
}

impl Default for IdpConfig {
    fn default() -> Self {
        Self {
            login_url: String::new(),
            entity_id: String::new(),
            certificate: String::new(),
            acs_url: String::new(),
            clock_skew_seconds: default_clock_skew(),
        }
    }
}

fn default_clock_skew() -> i64 {
    60
}
