//! Configuration loaded from environment variables.
//!
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection pool
//! - [`jwt`]: signing secret and token lifetime

pub mod cors;
pub mod database;
pub mod jwt;
