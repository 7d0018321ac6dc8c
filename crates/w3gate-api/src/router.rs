//! Route definitions for the W3Gate gateway.
//!
//! The auth endpoints are mounted unguarded; every other route, including
//! the fallback, sits behind the session-validation middleware.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Path of the login-initiation (GET) and assertion-consumer (POST)
/// endpoint. Session-redirect outcomes all target this path.
pub const LOGIN_PATH: &str = "/__auth";

/// Path of the logout endpoint.
pub const LOGOUT_PATH: &str = "/__logout";

/// Build the complete Axum router.
///
/// `app_routes` carries the downstream application's routes; they are
/// wrapped in the session middleware so every one of them passes through
/// `authorize` before being reached.
pub fn build_router(state: AppState, app_routes: Router<AppState>) -> Router {
    let auth_routes = Router::new()
        .route(
            LOGIN_PATH,
            get(handlers::auth::login_redirect).post(handlers::auth::consume_assertion),
        )
        .route(LOGOUT_PATH, get(handlers::auth::logout));

    let protected = app_routes
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::validate_session,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}
