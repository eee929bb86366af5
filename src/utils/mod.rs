//! Shared utilities.
//!
//! - [`errors`]: application error type and HTTP status mapping
//! - [`jwt`]: session token creation and verification
//! - [`password`]: password hashing and verification

pub mod errors;
pub mod jwt;
pub mod password;
