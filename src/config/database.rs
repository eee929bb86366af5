//! PostgreSQL connection pool initialization.
//!
//! The pool is created once at startup, stored in [`crate::state::AppState`],
//! and passed to service functions. Nothing in the codebase reaches for a
//! process-global connection handle.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

/// Connects to the database named by `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection cannot be established;
/// the server has nothing useful to do without its store.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
