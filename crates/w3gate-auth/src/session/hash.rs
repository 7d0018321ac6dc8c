//! Keyed integrity hash over the session properties.
//!
//! The hash covers the decoded cookie-carried *strings* — mint and verify
//! must agree bytewise, so the expiration is hashed in its string form.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the integrity hash for a session property tuple.
///
/// HMAC-SHA256 keyed by the server secret over
/// `"{user_id}-{session_id}-{expiration}"`, encoded base64url without
/// padding. Pure and deterministic: identical inputs (including the
/// secret) always yield an identical hash.
pub fn generate_hash_for_properties(
    user_id: &str,
    session_id: &str,
    expiration: &str,
    secret: &str,
) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length is always valid");
    mac.update(user_id.as_bytes());
    mac.update(b"-");
    mac.update(session_id.as_bytes());
    mac.update(b"-");
    mac.update(expiration.as_bytes());

    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}
