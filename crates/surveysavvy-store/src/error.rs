//! Error types for the store

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format or write order
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
