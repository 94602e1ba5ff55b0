//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and propagation to callers.

use thiserror::Error;

/// Result type used throughout the data-access layer.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors surfaced by the data-access layer.
///
/// Driver errors are embedded unchanged so callers can inspect the
/// underlying failure (for example a unique-constraint violation when
/// inserting a user whose email is already registered). This layer never
/// retries and never substitutes a fallback value.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Establishing a connection (or building the pool) failed.
    #[error("failed to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed during execution.
    #[error("query execution failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The database configuration is incomplete or invalid.
    #[error("invalid database configuration: {0}")]
    Config(String),
}

impl DatabaseError {
    /// The underlying driver error, if this error wraps one.
    pub fn driver_error(&self) -> Option<&sqlx::Error> {
        match self {
            DatabaseError::Connection(err) | DatabaseError::Query(err) => Some(err),
            DatabaseError::Config(_) => None,
        }
    }
}
