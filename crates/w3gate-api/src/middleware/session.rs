//! Session-validation middleware.
//!
//! Applied to every route except the auth endpoints. Evaluates the
//! session guard against the request's cookies and maps the decision to
//! cookie mutations plus a redirect or request continuation.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::debug;

use w3gate_auth::session::Decision;

use crate::cookies;
use crate::extractors::AuthenticatedUser;
use crate::redirect::found;
use crate::router::LOGIN_PATH;
use crate::state::AppState;

/// Advisory `Strict-Transport-Security` value attached when a request
/// with session state arrives over an insecure transport.
const HSTS_HEADER_VALUE: &str = "max-age=86400";

/// Validate the request's session and act on the outcome.
///
/// Side effects are cookie mutations only; there is no session store to
/// consult. The current wall-clock time is sampled once per request and
/// handed to the pure guard.
pub async fn validate_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let session = cookies::session_cookies(&jar);

    let original_uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    // The gateway terminates behind a proxy; the forwarded protocol is
    // the transport-security signal.
    let secure = request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("https"))
        .unwrap_or(false);

    let authorization = state
        .guard
        .authorize(&session, &original_uri, secure, Utc::now());

    let mut response = match authorization.decision {
        Decision::Allow { user_id } => {
            debug!(user_id = %user_id, "Session is valid; allowing request to continue");
            let jar = cookies::clear_return_path(jar);
            request.extensions_mut().insert(AuthenticatedUser(user_id));
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        Decision::ChallengeRedirect => {
            let jar = cookies::clear_session_cookies(jar);
            (jar, found(&original_uri)).into_response()
        }
        Decision::LoginRedirect { return_path } => {
            let jar = cookies::set_return_path(jar, &return_path, &state.config.session);
            (jar, found(LOGIN_PATH)).into_response()
        }
        Decision::ExpiredRedirect => {
            let jar = cookies::clear_session_cookies(jar);
            (jar, found(LOGIN_PATH)).into_response()
        }
        Decision::TamperedRedirect { return_path } => {
            let jar = cookies::set_return_path(jar, &return_path, &state.config.session);
            (jar, found(LOGIN_PATH)).into_response()
        }
    };

    if authorization.hsts_advisory {
        response.headers_mut().insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_HEADER_VALUE),
        );
    }

    response
}
