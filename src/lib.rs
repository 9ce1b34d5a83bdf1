//! # Cardshop - Trading card shop inventory
//!
//! Cards and employees kept in a single SQLite file.
//!
//! Cardshop provides:
//! - Schema creation and connection management for the shop store
//! - Card accessors addressed by numeric id or exact name
//! - Employee accessors addressed by numeric id
//! - A pseudo-random sample generator for seeding empty tables
//! - Terminal rendering helpers for the `cardshop` CLI

pub mod identifier;
pub mod model;
pub mod storage;
pub mod sample;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use identifier::CardIdentifier;
pub use model::{Card, CardChanges, Employee, EmployeeChanges, NewCard, NewEmployee};
pub use storage::{ShopStore, SeedReport};

use std::path::PathBuf;

/// Result type alias for Cardshop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Cardshop operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Storage unavailable at {}: {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Storage error: {0}")]
    Storage(rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        use rusqlite::ffi;

        if let rusqlite::Error::SqliteFailure(ref err, ref msg) = e {
            let detail = msg.clone().unwrap_or_else(|| err.to_string());
            match err.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Error::UniqueViolation(detail);
                }
                ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                    return Error::ConstraintViolation(detail);
                }
                _ if err.code == rusqlite::ErrorCode::ConstraintViolation => {
                    return Error::ConstraintViolation(detail);
                }
                _ => {}
            }
        }
        Error::Storage(e)
    }
}
