//! The `w3id_*` cookies and jar helpers.
//!
//! Values are percent-encoded on write and decoded on read; the integrity
//! hash is always computed over the decoded forms. All cookies use path
//! `/` and are readable by client-side code (`httpOnly = false`).

use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Utc};
use time::Duration;

use w3gate_auth::session::{SessionCookies, SessionToken};
use w3gate_core::config::session::SessionConfig;

/// Principal identifier cookie.
pub const USERID: &str = "w3id_userid";
/// Provider session index cookie.
pub const SESSIONID: &str = "w3id_sessionid";
/// Expiration cookie (epoch milliseconds).
pub const EXPIRATION: &str = "w3id_expiration";
/// Integrity hash cookie.
pub const HASH: &str = "w3id_hash";
/// Forced-reauthentication marker.
pub const CHALLENGE: &str = "w3id_challenge";
/// Pending post-login return path.
pub const REDIRECT: &str = "w3id_redirect";

/// Read the session cookie tuple from a jar, percent-decoding each value.
pub fn session_cookies(jar: &CookieJar) -> SessionCookies {
    SessionCookies::from_raw(
        jar.get(USERID).map(Cookie::value),
        jar.get(SESSIONID).map(Cookie::value),
        jar.get(EXPIRATION).map(Cookie::value),
        jar.get(HASH).map(Cookie::value),
        jar.get(CHALLENGE).map(Cookie::value),
        jar.get(REDIRECT).map(Cookie::value),
    )
}

/// Set all four session cookies from a freshly minted token.
///
/// Max-age is the remaining session lifetime, clamped to non-negative.
/// The four cookies are always written together.
pub fn set_session_cookies(jar: CookieJar, token: &SessionToken, now: DateTime<Utc>) -> CookieJar {
    let max_age = Duration::milliseconds(token.time_to_expiry(now).num_milliseconds());

    jar.add(persistent(
        USERID,
        urlencoding::encode(&token.user_id).into_owned(),
        max_age,
    ))
    .add(persistent(
        SESSIONID,
        urlencoding::encode(&token.session_id).into_owned(),
        max_age,
    ))
    .add(persistent(
        EXPIRATION,
        token.expiration_cookie_value(),
        max_age,
    ))
    .add(persistent(HASH, token.hash.clone(), max_age))
}

/// Clear every session cookie, challenge marker included.
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal(USERID))
        .remove(removal(SESSIONID))
        .remove(removal(EXPIRATION))
        .remove(removal(HASH))
        .remove(removal(CHALLENGE))
}

/// Record the original request path for restoration after login.
pub fn set_return_path(jar: CookieJar, path: &str, config: &SessionConfig) -> CookieJar {
    jar.add(persistent(
        REDIRECT,
        urlencoding::encode(path).into_owned(),
        Duration::minutes(config.redirect_ttl_minutes as i64),
    ))
}

/// Drop the pending return path.
pub fn clear_return_path(jar: CookieJar) -> CookieJar {
    jar.remove(removal(REDIRECT))
}

/// The pending return path, percent-decoded.
pub fn pending_return_path(jar: &CookieJar) -> Option<String> {
    jar.get(REDIRECT)
        .and_then(|c| urlencoding::decode(c.value()).ok())
        .map(|v| v.into_owned())
}

/// Set the forced-reauthentication marker.
pub fn set_challenge(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    jar.add(persistent(
        CHALLENGE,
        "1".to_string(),
        Duration::days(config.challenge_ttl_days as i64),
    ))
}

fn persistent(name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(false);
    cookie.set_max_age(max_age);
    cookie
}

fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}
