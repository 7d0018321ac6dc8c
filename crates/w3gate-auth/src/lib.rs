//! # w3gate-auth
//!
//! The session-integrity protocol and the SAML assertion adapter for the
//! W3Gate session-validation gateway.
//!
//! ## Modules
//!
//! - `session` — keyed integrity hash, the cookie-carried session token,
//!   and the stateless per-request authorization decision
//! - `saml` — adapter around the external SAML collaborator: login-redirect
//!   URL construction and assertion consumption

pub mod saml;
pub mod session;

pub use saml::{AssertionConsumer, IdentityAssertion};
pub use session::{Authorization, Decision, SessionCookies, SessionGuard, SessionToken};
