//! Core trait definitions for the storage layer

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StorageResult;
use crate::calculator::SavedCalculation;

/// Health report for a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub healthy: bool,
    pub backend_type: String,
    pub entries: usize,
    pub errors: Vec<String>,
}

/// Medium-agnostic keyed storage for saved calculations
///
/// Implementations hold complete records only: an `insert` that returns an
/// error must leave nothing visible to later reads.
#[async_trait]
pub trait CalculationBackend: Send + Sync {
    /// Store a new calculation; fails with `Conflict` if the id is taken
    async fn insert(&self, calculation: SavedCalculation) -> StorageResult<()>;

    /// Load a calculation by id
    async fn get(&self, id: &str) -> StorageResult<Option<SavedCalculation>>;

    /// Snapshot of every stored calculation, in no particular order
    async fn list(&self) -> StorageResult<Vec<SavedCalculation>>;

    /// Remove a calculation, reporting whether it existed
    async fn remove(&self, id: &str) -> StorageResult<bool>;

    /// Remove everything, returning how many calculations were dropped
    async fn clear(&self) -> StorageResult<usize>;

    /// Number of stored calculations
    async fn len(&self) -> StorageResult<usize>;

    /// Check the health of the storage backend
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}
