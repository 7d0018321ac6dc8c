//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use w3gate_auth::saml::AssertionConsumer;
use w3gate_auth::session::SessionGuard;
use w3gate_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Everything here is
/// immutable after startup — the gateway keeps no server-side session
/// state, so all fields are cheap `Arc` clones.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Stateless session validator.
    pub guard: Arc<SessionGuard>,
    /// Identity-provider adapter.
    pub assertion_consumer: Arc<AssertionConsumer>,
}

impl AppState {
    /// Construct the state from a validated configuration.
    pub fn new(config: AppConfig) -> Self {
        let guard = SessionGuard::new(&config.session);
        let assertion_consumer = AssertionConsumer::new(config.idp.clone());

        Self {
            config: Arc::new(config),
            guard: Arc::new(guard),
            assertion_consumer: Arc::new(assertion_consumer),
        }
    }
}
