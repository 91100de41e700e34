// src/config/storage.rs
// DOCUMENTATION: Storage initialization
// PURPOSE: Open the configured store file once at startup

use crate::config::Config;
use crate::storage::{FileStorage, Storage, StorageError};
use std::sync::Arc;

/// Open the file-backed store
/// DOCUMENTATION: Called once during application startup in main.rs.
/// Returns the handle shared by every worker.
pub async fn init_storage(config: &Config) -> Result<Arc<dyn Storage>, StorageError> {
    log::info!("Initializing storage: {}", config.storage_path);

    let storage = FileStorage::open(&config.storage_path).await?;

    log::info!("Storage initialized successfully");
    Ok(Arc::new(storage))
}
