//! `302 Found` redirect responses.
//!
//! The whole login flow redirects with `302 Found`; axum's `Redirect`
//! helper only offers 303/307/308, so the response is built directly.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Build a `302 Found` response targeting `location`.
pub fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
