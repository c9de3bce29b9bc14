// src/error.rs

//! Error types for the resolvable pool

use thiserror::Error;

/// Errors raised while building or mutating pool data
///
/// None of these are transient: they point at bad metadata fed into the
/// pool or at a caller breaking a status rule.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid capability: {0}")]
    InvalidCapability(String),

    #[error("Invalid edition: {0}")]
    InvalidEdition(String),

    #[error("Status is locked: {0}")]
    LockedStatus(String),

    #[error("Stale pool handle: {0}")]
    StaleHandle(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, Error>;
