//! The cookie-carried session token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::hash::generate_hash_for_properties;

/// A complete session token as carried in the `w3id_*` cookies.
///
/// The four fields are created together at login and are only ever set,
/// carried, and cleared as a unit — no field is partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Opaque principal identifier from the identity provider.
    pub user_id: String,
    /// Opaque session index issued by the identity provider per login.
    pub session_id: String,
    /// Absolute expiration in epoch milliseconds.
    pub expiration_ms: i64,
    /// Keyed integrity hash over the other three fields.
    pub hash: String,
}

impl SessionToken {
    /// Mint a new token from a validated identity assertion.
    ///
    /// Computes the integrity hash over the same string forms the cookies
    /// will carry.
    pub fn mint(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        expires_at: DateTime<Utc>,
        secret: &str,
    ) -> Self {
        let user_id = user_id.into();
        let session_id = session_id.into();
        let expiration_ms = expires_at.timestamp_millis();
        let hash = generate_hash_for_properties(
            &user_id,
            &session_id,
            &expiration_ms.to_string(),
            secret,
        );

        Self {
            user_id,
            session_id,
            expiration_ms,
            hash,
        }
    }

    /// The expiration as carried in the `w3id_expiration` cookie.
    pub fn expiration_cookie_value(&self) -> String {
        self.expiration_ms.to_string()
    }

    /// Time remaining until expiration, clamped to non-negative.
    ///
    /// Used as the max-age of all four session cookies.
    pub fn time_to_expiry(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.expiration_ms - now.timestamp_millis();
        Duration::milliseconds(remaining.max(0))
    }
}
