//! Stateless session-integrity protocol.
//!
//! Sessions live entirely in client-side cookies; every request is
//! re-validated against the keyed integrity hash and the current time.

pub mod guard;
pub mod hash;
pub mod token;

pub use guard::{Authorization, Decision, SessionCookies, SessionGuard};
pub use token::SessionToken;
