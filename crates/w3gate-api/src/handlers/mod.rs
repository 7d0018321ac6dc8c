//! Request handlers.

pub mod auth;

use axum::http::StatusCode;

/// Fallback for unmatched paths.
///
/// Registered behind the session middleware so unknown paths still go
/// through authorization before a 404 is revealed.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
