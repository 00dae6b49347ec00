//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError ── on mutation ──► logged by CartStore, never returned   │
//! │       │                                                                 │
//! │       ▼ on construction / config                                        │
//! │  StoreError ────────────────────► caller (CLI prints it)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a [`CartStorage`](crate::CartStorage) backend or of the
/// persisted record format.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used to address a record.
    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// The record could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record was written by an incompatible version.
    #[error("Unsupported cart record version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        StorageError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures while building a store from configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The configuration is well-formed but not usable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// cart.toml could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// cart.toml could not be read.
    #[error("Failed to read configuration: {0}")]
    ConfigRead(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for store construction and configuration.
pub type StoreResult<T> = Result<T, StoreError>;
