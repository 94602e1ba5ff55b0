//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the database connection pool
//! and providing a central point for database-related configurations and helpers.

pub mod models;
pub mod plan;
pub mod queries;

// Re-exports for convenience
pub use models::*;
pub use plan::*;
pub use queries::*;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::errors::{DatabaseError, DatabaseResult};

/// Builds the shared connection pool from the given configuration.
///
/// The pool is handed to [`Database::new`]; nothing in this crate holds it
/// as process-wide state, so tests can substitute a pool pointed at a
/// throwaway database.
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_url())
        .await
        .map_err(DatabaseError::Connection)?;

    debug!(
        "connected to database {} at {}:{}",
        config.database, config.host, config.port
    );
    Ok(pool)
}
