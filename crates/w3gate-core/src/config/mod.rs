//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod idp;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::idp::IdpConfig;
use self::logging::LoggingConfig;
use self::session::SessionConfig;

use crate::error::AppError;

/// Minimum length of the session-integrity secret.
///
/// A shorter secret is a startup-fatal configuration error, never a
/// runtime one.
pub const MIN_SECRET_LENGTH: usize = 72;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Identity-provider settings.
    #[serde(default)]
    pub idp: IdpConfig,
    /// Session-integrity settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `W3GATE`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("W3GATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check the invariants the gateway cannot start without.
    ///
    /// The identity-provider login URL, entity ID, and certificate must be
    /// present, and the integrity secret must be at least
    /// [`MIN_SECRET_LENGTH`] characters.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("idp.login_url", &self.idp.login_url),
            ("idp.entity_id", &self.idp.entity_id),
            ("idp.certificate", &self.idp.certificate),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "Missing required settings: {}",
                missing.join(", ")
            )));
        }

        if self.session.secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "session.secret must be at least {MIN_SECRET_LENGTH} characters long; \
                 currently it is {} characters long",
                self.session.secret.len()
            )));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            idp: IdpConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
