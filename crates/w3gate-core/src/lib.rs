//! # w3gate-core
//!
//! Core crate for the W3Gate session-validation gateway. Contains the
//! configuration schemas and the unified error system.
//!
//! This crate has **no** internal dependencies on other W3Gate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
