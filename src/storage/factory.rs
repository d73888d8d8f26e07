//! Storage factory for creating backend instances

use std::sync::Arc;
use tracing::info;

use super::backends::{FileBackend, MemoryBackend};
use super::config::{BackendType, StorageConfig};
use super::error::StorageResult;
use super::traits::CalculationBackend;

/// Factory for creating storage backends
pub struct StorageFactory;

impl StorageFactory {
    /// Create a backend from explicit configuration
    pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn CalculationBackend>> {
        match &config.backend {
            BackendType::File => {
                let backend = FileBackend::new(config).await?;
                info!("Using file storage at {}", backend.path().display());
                Ok(Arc::new(backend))
            }
            BackendType::Memory => {
                info!("Using in-memory storage");
                Ok(Arc::new(MemoryBackend::new(config)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::{BackendConfig, MemoryConfig};

    #[tokio::test]
    async fn test_factory_creates_file_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StorageConfig::file(dir.path().join("calculations.json"));

        let backend = StorageFactory::from_config(&config).await.unwrap();
        let health = backend.health_check().await.unwrap();
        assert!(health.healthy);
        assert_eq!(health.backend_type, "file");
    }

    #[tokio::test]
    async fn test_factory_creates_memory_backend() {
        let backend = StorageFactory::from_config(&StorageConfig::memory())
            .await
            .unwrap();
        assert_eq!(backend.health_check().await.unwrap().backend_type, "memory");
    }

    #[tokio::test]
    async fn test_mismatched_backend_config_is_rejected() {
        let config = StorageConfig {
            backend: BackendType::File,
            backend_config: BackendConfig::Memory(MemoryConfig::default()),
            ..Default::default()
        };

        assert!(StorageFactory::from_config(&config).await.is_err());
    }
}
