//! Error types for forge

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid name '{0}': only letters, numbers, hyphens, and underscores are allowed")]
    InvalidName(String),

    #[error("Name '{0}' is too short: must be at least 2 characters")]
    NameTooShort(String),

    #[error("Name '{0}' is too long: must be 50 characters or less")]
    NameTooLong(String),

    #[error("Registry document is corrupt: {0}")]
    RegistryCorrupt(String),

    #[error("Counter document is corrupt: {0}")]
    CounterCorrupt(String),

    #[error("Malformed document {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Workspace not initialized. Run 'forge init' first.")]
    NotInitialized,

    #[error("Workspace already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
