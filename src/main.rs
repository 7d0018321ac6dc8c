//! W3Gate Server — Session-Validation Gateway
//!
//! Main entry point that wires all crates together and starts the server.

use axum::Router;
use axum::routing::get;
use tracing_subscriber::{EnvFilter, fmt};

use w3gate_api::AppState;
use w3gate_api::extractors::AuthenticatedUser;
use w3gate_core::config::AppConfig;
use w3gate_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment, then check the
/// startup-fatal invariants (required provider settings, secret length).
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("W3GATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;

    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Landing route, reached only through the session guard.
async fn landing(user: AuthenticatedUser) -> String {
    format!("Signed in as {}\n", user.user_id())
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting W3Gate v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.clone());

    let app_routes = Router::new().route("/", get(landing));
    let app = w3gate_api::build_router(state, app_routes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("W3Gate listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
