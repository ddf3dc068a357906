//! Persistent key-value storage for cart snapshots.
//!
//! The cart treats the host storage subsystem as an opaque asynchronous
//! key-value store. Backends implement [`KeyValueStore`]:
//!
//! - [`MemoryStore`] - Process-local map, for tests and ephemeral sessions
//! - [`FileStore`] - One file per key in a data directory
//!
//! Both operations are fallible. A missing key is not an error and reads
//! as `None`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        /// Storage key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Backend refused the operation (quota, permissions, offline).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value store.
///
/// Implementations must be safe to share across tasks. Writes replace the
/// whole value for a key.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
