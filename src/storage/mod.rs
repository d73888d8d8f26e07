//! Storage layer for saved calculations
//!
//! [`CalculationStore`] implements save, lookup and recent-history on top
//! of a [`CalculationBackend`]. Backends only hold complete records; the
//! store owns id generation, computation and timestamps, so every backend
//! behaves the same from the caller's side.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod store;
pub mod traits;


pub use backends::{FileBackend, MemoryBackend};
pub use config::{BackendConfig, BackendType, FileConfig, MemoryConfig, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use store::{CalculationStore, StoreError, StoreResult, DEFAULT_RECENT_LIMIT};
pub use traits::{CalculationBackend, HealthStatus};

/// Build a store from explicit configuration
pub async fn open_store(config: &StorageConfig) -> StorageResult<CalculationStore> {
    let backend = StorageFactory::from_config(config).await?;
    Ok(CalculationStore::new(backend))
}
