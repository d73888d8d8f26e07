//! In-memory storage backend

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::calculator::SavedCalculation;
use crate::storage::{
    config::{BackendConfig, MemoryConfig, StorageConfig},
    error::{StorageError, StorageResult},
    traits::{CalculationBackend, HealthStatus},
};

/// Process-lifetime storage backed by a map behind a single lock
#[derive(Clone, Default)]
pub struct MemoryBackend {
    config: MemoryConfig,
    calculations: Arc<RwLock<HashMap<String, SavedCalculation>>>,
}

impl MemoryBackend {
    /// Create a new memory backend
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        match &config.backend_config {
            BackendConfig::Memory(cfg) => Ok(Self::from_memory_config(cfg)),
            _ => Err(StorageError::configuration(
                "Invalid backend config for memory storage",
            )),
        }
    }

    /// Create a new memory backend directly from MemoryConfig
    pub fn from_memory_config(config: &MemoryConfig) -> Self {
        Self {
            config: config.clone(),
            calculations: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CalculationBackend for MemoryBackend {
    async fn insert(&self, calculation: SavedCalculation) -> StorageResult<()> {
        let mut calculations = self.calculations.write().await;

        if calculations.contains_key(&calculation.id) {
            return Err(StorageError::conflict(&calculation.id));
        }
        if let Some(limit) = self.config.max_entries {
            if calculations.len() >= limit {
                return Err(StorageError::QuotaExceeded { limit });
            }
        }

        calculations.insert(calculation.id.clone(), calculation);
        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<SavedCalculation>> {
        Ok(self.calculations.read().await.get(id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<SavedCalculation>> {
        Ok(self.calculations.read().await.values().cloned().collect())
    }

    async fn remove(&self, id: &str) -> StorageResult<bool> {
        Ok(self.calculations.write().await.remove(id).is_some())
    }

    async fn clear(&self) -> StorageResult<usize> {
        let mut calculations = self.calculations.write().await;
        let removed = calculations.len();
        calculations.clear();
        Ok(removed)
    }

    async fn len(&self) -> StorageResult<usize> {
        Ok(self.calculations.read().await.len())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: true,
            backend_type: "memory".to_string(),
            entries: self.calculations.read().await.len(),
            errors: vec![],
        })
    }
}
