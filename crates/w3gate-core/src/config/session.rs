//! Session-integrity configuration.

use serde::{Deserialize, Serialize};

/// Session-integrity protocol configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Server-held secret keying the session integrity hash.
    ///
    /// Process-wide and immutable for the process lifetime. Rotating it
    /// invalidates every outstanding session.
    #[serde(default)]
    pub secret: String,
    /// Lifetime of the post-login return-path cookie in minutes.
    #[serde(default = "default_redirect_ttl")]
    pub redirect_ttl_minutes: u64,
    /// Lifetime of the forced-reauthentication challenge cookie in days.
    #[serde(default = "default_challenge_ttl")]
    pub challenge_ttl_days: u64,
    /// Where to send a caller after login when no return path is pending.
    #[serde(default = "default_landing_path")]
    pub default_landing_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            redirect_ttl_minutes: default_redirect_ttl(),
            challenge_ttl_days: default_challenge_ttl(),
            default_landing_path: default_landing_path(),
        }
    }
}

fn default_redirect_ttl() -> u64 {
    30
}

fn default_challenge_ttl() -> u64 {
    7
}

fn default_landing_path() -> String {
    "/".to_string()
}
