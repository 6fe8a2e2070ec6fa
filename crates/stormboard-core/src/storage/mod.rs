//! Storage abstraction for board persistence.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::board::BoardDocument;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("board not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for board snapshot storage backends.
///
/// A board is stored whole under its room key; implementations can
/// keep snapshots in memory or on the filesystem.
pub trait Storage: Send + Sync {
    /// Save a board snapshot under a room key.
    fn save(&self, room: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the board snapshot for a room key.
    fn load(&self, room: &str) -> BoxFuture<'_, StorageResult<BoardDocument>>;

    /// Delete a stored board.
    fn delete(&self, room: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored room keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a board exists for a room key.
    fn exists(&self, room: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
