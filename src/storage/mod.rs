// src/storage/mod.rs
// DOCUMENTATION: Storage facade over typed records
// PURPOSE: Keyed get/all/new/delete/save used by every repository

pub mod file_storage;

pub use file_storage::FileStorage;

use crate::models::{Kind, Record};
use async_trait::async_trait;
use thiserror::Error;

/// Failures raised by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt store entry {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Key-space of records addressed by (kind, id)
/// DOCUMENTATION: `new` and `delete` stage changes; `save` flushes everything
/// staged so far. Callers flush once, after all mutations of a request.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Look up a single record
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Record>, StorageError>;

    /// Every record of `kind`
    async fn all(&self, kind: Kind) -> Result<Vec<Record>, StorageError>;

    /// Records of `kind` owned by `parent_id`, oldest first
    async fn children(&self, kind: Kind, parent_id: &str) -> Result<Vec<Record>, StorageError>;

    /// Number of records of `kind`
    async fn count(&self, kind: Kind) -> Result<usize, StorageError>;

    /// Insert a record, replacing any record with the same key
    async fn new(&self, record: Record) -> Result<(), StorageError>;

    /// Overwrite a record only while it still exists; returns whether it was written
    async fn replace(&self, record: Record) -> Result<bool, StorageError>;

    /// Insert a record only while its parent exists; returns whether it was written.
    /// Records without a parent are always inserted.
    async fn attach(&self, record: Record) -> Result<bool, StorageError>;

    /// Remove a record; returns whether it existed
    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError>;

    /// Flush staged changes to the backing medium
    async fn save(&self) -> Result<(), StorageError>;
}
