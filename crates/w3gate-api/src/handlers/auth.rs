//! Auth handlers — login initiation, assertion consumption, logout.

use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use w3gate_auth::session::SessionToken;

use crate::cookies;
use crate::error::ApiError;
use crate::redirect::found;
use crate::state::AppState;

/// Form payload posted by the identity provider to the assertion-consumer
/// endpoint. `RelayState` may accompany it but is ignored; redirect
/// restoration uses the `w3id_redirect` cookie.
#[derive(Debug, Deserialize)]
pub struct AssertionForm {
    /// Base64-encoded provider response.
    #[serde(rename = "SAMLResponse")]
    pub saml_response: String,
}

/// GET /__auth — start a login at the identity provider.
pub async fn login_redirect(State(state): State<AppState>) -> Result<Response, ApiError> {
    let url = state.assertion_consumer.login_redirect_url()?;
    Ok(found(&url))
}

/// POST /__auth — consume the provider's assertion and mint a session.
///
/// On success all four session cookies are set together, the pending
/// return path is consumed, and the caller is redirected to it (or to the
/// configured landing path). Any provider failure surfaces as an opaque
/// 500.
pub async fn consume_assertion(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AssertionForm>,
) -> Result<Response, ApiError> {
    let now = Utc::now();
    let assertion = state
        .assertion_consumer
        .consume_response(&form.saml_response, now)?;

    let token = SessionToken::mint(
        assertion.user_id,
        assertion.session_id,
        assertion.expires_at,
        &state.config.session.secret,
    );

    let target = cookies::pending_return_path(&jar)
        .unwrap_or_else(|| state.config.session.default_landing_path.clone());

    let jar = cookies::set_session_cookies(jar, &token, now);
    let jar = cookies::clear_return_path(jar);

    info!(user_id = %token.user_id, "Session minted");
    Ok((jar, found(&target)).into_response())
}

/// GET /__logout — set the challenge marker and bounce to the landing
/// path. The session guard's challenge branch completes the cookie wipe
/// on the next request.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = cookies::set_challenge(jar, &state.config.session);
    (jar, found(&state.config.session.default_landing_path)).into_response()
}
