//! Adapter around the external SAML collaborator.
//!
//! Wire parsing and signature handling belong to the `samael` crate; this
//! module only builds the login-redirect URL and adapts a validated
//! response into the fixed identity record the session guard mints from.

pub mod consumer;

pub use consumer::{AssertionConsumer, IdentityAssertion};
