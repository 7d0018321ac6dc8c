//! # w3gate-api
//!
//! HTTP layer for W3Gate built on Axum.
//!
//! Provides the login-initiation and assertion-consumer endpoints, the
//! session-validation middleware applied to every other route, cookie
//! plumbing, extractors, and error mapping.

pub mod cookies;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
