//! Calculation store
//!
//! [`CalculationStore`] owns the save/lookup/history workflow on top of any
//! [`CalculationBackend`]. It is constructed explicitly and shared by
//! cloning; nothing here is global.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::StorageError;
use super::traits::{CalculationBackend, HealthStatus};
use crate::calculator::{
    compute, validate, CalculationInput, CalculationRecord, CalculationSummary, SaveOutcome,
    SavedCalculation, ValidationError,
};
use crate::error::{ErrorCode, ProfitShareError};

/// Default length of the recent-history listing
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Errors surfaced by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid calculation input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<StoreError> for ProfitShareError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => {
                ProfitShareError::validation_with_code(ErrorCode::VALIDATION_INVALID_INPUT, e.to_string())
            }
            StoreError::NotFound(id) => ProfitShareError::not_found(format!("Calculation {}", id)),
            StoreError::Storage(e) => e.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed history of calculations with recency ordering
#[derive(Clone)]
pub struct CalculationStore {
    backend: Arc<dyn CalculationBackend>,
    last_timestamp: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl CalculationStore {
    pub fn new(backend: Arc<dyn CalculationBackend>) -> Self {
        Self {
            backend,
            last_timestamp: Arc::new(Mutex::new(None)),
        }
    }

    /// Store backed by a fresh in-memory map
    pub fn in_memory() -> Self {
        Self::new(Arc::new(super::backends::MemoryBackend::default()))
    }

    /// Next save timestamp; strictly later than any this store issued before
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let mut last = self
            .last_timestamp
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let timestamp = match *last {
            Some(previous) if now <= previous => previous + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(timestamp);
        timestamp
    }

    /// Validate, compute and record a calculation under a fresh id
    pub async fn save(&self, input: CalculationInput) -> StoreResult<SaveOutcome> {
        validate(&input)?;

        let id = Uuid::new_v4().to_string();
        let result = compute(&input);
        let saved = SavedCalculation {
            id: id.clone(),
            input,
            result: result.clone(),
            timestamp: self.next_timestamp(),
        };

        self.backend.insert(saved).await?;
        info!(
            "Saved calculation {} (net profit {})",
            id, result.net_profit
        );

        Ok(SaveOutcome { id, result })
    }

    /// Look up the input and result stored under `id`
    pub async fn get(&self, id: &str) -> StoreResult<CalculationRecord> {
        match self.backend.get(id).await? {
            Some(saved) => Ok(saved.into_record()),
            None => {
                debug!("Calculation {} not found", id);
                Err(StoreError::NotFound(id.to_string()))
            }
        }
    }

    /// The `limit` most recent calculations, newest first
    ///
    /// Equal timestamps are ordered by id so repeated calls against an
    /// unchanged store agree.
    pub async fn list_recent(&self, limit: usize) -> StoreResult<Vec<CalculationSummary>> {
        let mut calculations = self.backend.list().await?;
        calculations.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(calculations
            .iter()
            .take(limit)
            .map(SavedCalculation::summary)
            .collect())
    }

    /// Remove one calculation, reporting whether it existed
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let removed = self.backend.remove(id).await?;
        if removed {
            info!("Deleted calculation {}", id);
        }
        Ok(removed)
    }

    /// Remove every calculation, returning how many were dropped
    pub async fn clear(&self) -> StoreResult<usize> {
        let removed = self.backend.clear().await?;
        info!("Cleared {} calculations", removed);
        Ok(removed)
    }

    pub async fn len(&self) -> StoreResult<usize> {
        Ok(self.backend.len().await?)
    }

    pub async fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len().await? == 0)
    }

    pub async fn health_check(&self) -> StoreResult<HealthStatus> {
        Ok(self.backend.health_check().await?)
    }
}
