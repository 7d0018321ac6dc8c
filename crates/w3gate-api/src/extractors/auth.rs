//! `AuthenticatedUser` extractor — the principal established by the
//! session-validation middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use w3gate_core::error::AppError;

use crate::error::ApiError;

/// The authenticated principal identifier, available to any handler behind
/// the session middleware.
///
/// Inserted into request extensions only after an `Allow` decision; a
/// handler reached without one rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    /// Returns the principal identifier.
    pub fn user_id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::authentication("No authenticated session on this request").into()
            })
    }
}
