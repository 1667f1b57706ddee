//! Persistence layer for focusd
//!
//! Provides:
//! - User policies and app-to-policy assignments (JSON documents)
//! - Bypass expiries (one row per app, stored as raw local timestamps)
//! - Bypass audit log (append-only markdown file)
//!
//! Corrupt policy or assignment documents fail open to an empty
//! collection; callers are never aborted by a malformed blob.

mod audit;
mod sqlite;
mod traits;

pub use audit::*;
pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
