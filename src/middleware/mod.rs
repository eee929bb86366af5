//! Authentication and authorization middleware.
//!
//! Token parsing and verification live in exactly one place: the [`auth::AuthUser`]
//! extractor. Role gates are attached per route group via the named wrappers
//! in [`role`], so the allowed role set is visible at every registration.

pub mod auth;
pub mod role;
