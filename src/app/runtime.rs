//! Runtime initialization

use crate::app::config::AppConfig;
use crate::error::ProfitShareError;
use crate::storage::{open_store, CalculationStore};
use anyhow::Result;
use tracing::debug;

/// Open the store described by `config`
pub async fn open_configured_store(config: &AppConfig) -> Result<CalculationStore> {
    debug!("Opening {:?} calculation store", config.storage.backend);
    let store = open_store(&config.storage)
        .await
        .map_err(ProfitShareError::from)?;
    Ok(store)
}
