#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::{StorageBackend, StorageConfig, TomlConfig};

use crate::core::csv_storage::CsvStorage;
use crate::core::memory_storage::MemoryStorage;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Builds the one storage instance the process works against.
pub fn build_storage(config: &StorageConfig) -> Result<Box<dyn Storage>> {
    match config.backend {
        StorageBackend::Csv => {
            tracing::debug!("Using CSV storage in {}", config.data_dir);
            let storage = CsvStorage::open(&config.data_dir, config.files.clone())?;
            Ok(Box::new(storage))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; it starts empty and nothing outlives this process");
            Ok(Box::new(MemoryStorage::new()))
        }
    }
}
