//! # Storage Module
//!
//! The persistence port the cart store writes through.
//!
//! ## Port Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storage Port                                         │
//! │                                                                         │
//! │  CartStore                                                             │
//! │       │                                                                 │
//! │       │  storage.save("cart-storage", "{\"state\":...}")               │
//! │       ▼                                                                 │
//! │  CartStorage (trait)                                                   │
//! │  ├── load(&self, key)   -> Option<String>                              │
//! │  ├── save(&mut self, key, value)                                       │
//! │  └── remove(&mut self, key)                                            │
//! │       │                                                                 │
//! │       ├──► MemoryStorage   (HashMap, tests / ephemeral sessions)       │
//! │       └──► FileStorage     (<dir>/<key>.json)                          │
//! │                                                                         │
//! │  The port deals in raw strings. Encoding the cart record is the        │
//! │  store's job (see `record`), so backends stay format-agnostic.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{StorageError, StorageResult};

/// Key-value string storage backing a [`CartStore`](crate::CartStore).
pub trait CartStorage {
    /// Reads the value stored under `key`. `Ok(None)` when nothing is stored.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the value under `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Validates a storage key.
///
/// ## Rules
/// - Must not be empty, at most 128 characters
/// - Only ASCII letters, digits, `.`, `_` and `-`
/// - Must not start with `.` (no hidden files, no `..`)
///
/// Keys double as file names for [`FileStorage`], hence the restrictions.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key(key, "must not be empty"));
    }

    if key.len() > 128 {
        return Err(StorageError::invalid_key(key, "must be at most 128 characters"));
    }

    if key.starts_with('.') {
        return Err(StorageError::invalid_key(key, "must not start with '.'"));
    }

    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
    {
        return Err(StorageError::invalid_key(
            key,
            "must contain only letters, digits, '.', '_' and '-'",
        ));
    }

    Ok(())
}
