//! Per-request session authorization.
//!
//! [`SessionGuard::authorize`] is a total pure function from cookie state,
//! transport security, and the current time to one of five outcomes. The
//! HTTP layer performs the cookie mutations each outcome calls for; no
//! server-side session store exists.

use chrono::{DateTime, Utc};
use tracing::debug;

use w3gate_core::config::session::SessionConfig;

use super::hash::generate_hash_for_properties;

/// Cookie state extracted from an incoming request, percent-decoded.
///
/// A cookie whose value fails percent-decoding is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    /// `w3id_userid`
    pub user_id: Option<String>,
    /// `w3id_sessionid`
    pub session_id: Option<String>,
    /// `w3id_expiration` (epoch milliseconds, string form)
    pub expiration: Option<String>,
    /// `w3id_hash`
    pub hash: Option<String>,
    /// `w3id_challenge` (forced-reauthentication marker)
    pub challenge: Option<String>,
    /// `w3id_redirect` (pending return path)
    pub return_path: Option<String>,
}

impl SessionCookies {
    /// Build from raw cookie values, percent-decoding each one.
    pub fn from_raw(
        user_id: Option<&str>,
        session_id: Option<&str>,
        expiration: Option<&str>,
        hash: Option<&str>,
        challenge: Option<&str>,
        return_path: Option<&str>,
    ) -> Self {
        Self {
            user_id: decoded(user_id),
            session_id: decoded(session_id),
            expiration: decoded(expiration),
            hash: decoded(hash),
            challenge: decoded(challenge),
            return_path: decoded(return_path),
        }
    }
}

/// Percent-decode a raw cookie value; a malformed encoding counts as no
/// cookie at all, never as an error.
fn decoded(value: Option<&str>) -> Option<String> {
    value.and_then(|v| urlencoding::decode(v).ok().map(|d| d.into_owned()))
}

/// The authorization outcome for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Valid session. The HTTP layer clears any stale return-path cookie
    /// and exposes the principal to downstream handling.
    Allow {
        /// The authenticated principal identifier.
        user_id: String,
    },
    /// Challenge flag set: clear all session cookies and redirect to the
    /// current path, forcing a fresh login.
    ChallengeRedirect,
    /// No usable session: record the return path and redirect to the
    /// login-initiation endpoint.
    LoginRedirect {
        /// Original request path (including query) to restore after login.
        return_path: String,
    },
    /// Session expired: clear all session cookies and redirect to the
    /// login-initiation endpoint.
    ExpiredRedirect,
    /// Integrity hash mismatch: record the return path and redirect to the
    /// login-initiation endpoint.
    TamperedRedirect {
        /// Original request path (including query) to restore after login.
        return_path: String,
    },
}

/// A decision plus the transport-security advisory flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    /// The outcome of the ordered decision algorithm.
    pub decision: Decision,
    /// Whether a `Strict-Transport-Security` header should be attached.
    /// Advisory only — it never blocks the request.
    pub hsts_advisory: bool,
}

/// Stateless session validator.
///
/// Holds only the process-wide integrity secret; every call is a pure
/// function of its arguments.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    secret: String,
}

impl SessionGuard {
    /// Create a guard from the session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Evaluate a request's session state.
    ///
    /// The branches are evaluated in strict order; the first match wins:
    ///
    /// 1. challenge flag present → [`Decision::ChallengeRedirect`]
    /// 2. hash cookie absent → [`Decision::LoginRedirect`]
    /// 3. insecure transport → set the advisory flag, keep evaluating
    /// 4. identity cookie missing or malformed → [`Decision::LoginRedirect`]
    /// 5. expiration at or before `now` → [`Decision::ExpiredRedirect`]
    /// 6. recomputed hash differs → [`Decision::TamperedRedirect`]
    /// 7. otherwise → [`Decision::Allow`]
    pub fn authorize(
        &self,
        cookies: &SessionCookies,
        original_uri: &str,
        secure: bool,
        now: DateTime<Utc>,
    ) -> Authorization {
        if cookies.challenge.is_some() {
            debug!("Challenge flag set; invalidating session and forcing reauthentication");
            return Authorization {
                decision: Decision::ChallengeRedirect,
                hsts_advisory: false,
            };
        }

        let Some(carried_hash) = cookies.hash.as_deref() else {
            debug!("No hash to evaluate for session; redirecting to login");
            return Authorization {
                decision: Decision::LoginRedirect {
                    return_path: original_uri.to_string(),
                },
                hsts_advisory: false,
            };
        };

        let hsts_advisory = !secure;
        if hsts_advisory {
            debug!("Request is not transport-secure; advising Strict-Transport-Security");
        }

        let identity = cookies
            .user_id
            .as_deref()
            .zip(cookies.session_id.as_deref())
            .zip(cookies.expiration.as_deref());
        let Some(((user_id, session_id), expiration)) = identity else {
            debug!("Missing cookies required to validate session; redirecting to login");
            return Authorization {
                decision: Decision::LoginRedirect {
                    return_path: original_uri.to_string(),
                },
                hsts_advisory,
            };
        };

        // A non-numeric expiration is indistinguishable from a missing one.
        let Ok(expiration_ms) = expiration.parse::<i64>() else {
            debug!("Malformed expiration cookie; redirecting to login");
            return Authorization {
                decision: Decision::LoginRedirect {
                    return_path: original_uri.to_string(),
                },
                hsts_advisory,
            };
        };

        if expiration_ms <= now.timestamp_millis() {
            debug!("Session is too old; invalidating");
            return Authorization {
                decision: Decision::ExpiredRedirect,
                hsts_advisory,
            };
        }

        let expected = generate_hash_for_properties(user_id, session_id, expiration, &self.secret);
        if expected != carried_hash {
            debug!("Session has been tampered with; invalidating");
            return Authorization {
                decision: Decision::TamperedRedirect {
                    return_path: original_uri.to_string(),
                },
                hsts_advisory,
            };
        }

        Authorization {
            decision: Decision::Allow {
                user_id: user_id.to_string(),
            },
            hsts_advisory,
        }
    }
}
