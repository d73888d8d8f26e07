//! File-based storage backend
//!
//! All calculations live in one JSON document keyed by id. The document is
//! loaded once when the backend opens and rewritten on every mutation by
//! writing a sibling temp file and renaming it over the original.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::calculator::SavedCalculation;
use crate::storage::{
    config::{BackendConfig, FileConfig, StorageConfig},
    error::{StorageError, StorageResult},
    traits::{CalculationBackend, HealthStatus},
};

type CalculationMap = BTreeMap<String, SavedCalculation>;

/// File-based storage backend
pub struct FileBackend {
    config: FileConfig,
    calculations: RwLock<CalculationMap>,
}

impl FileBackend {
    /// Create a new file backend
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        match &config.backend_config {
            BackendConfig::File(cfg) => Self::open(cfg.clone()).await,
            _ => Err(StorageError::configuration(
                "Invalid backend config for file storage",
            )),
        }
    }

    /// Open the document at `config.path`, creating parent directories
    ///
    /// A location that cannot be created or read reports `Unavailable`; a
    /// document that exists but does not parse reports `Serialization`.
    pub async fn open(config: FileConfig) -> StorageResult<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StorageError::unavailable(format!(
                        "Cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let calculations = read_document(&config.path).await?;
        debug!(
            "Loaded {} calculations from {}",
            calculations.len(),
            config.path.display()
        );

        Ok(Self {
            config,
            calculations: RwLock::new(calculations),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .config
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.config.path.with_file_name(name)
    }

    /// Write the whole document; the previous version stays in place on failure
    async fn persist(&self, calculations: &CalculationMap) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(calculations)?;
        let temp = self.temp_path();

        if let Err(e) = fs::write(&temp, content).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::Io(e));
        }
        if let Err(e) = fs::rename(&temp, &self.config.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::Io(e));
        }
        Ok(())
    }
}

async fn read_document(path: &Path) -> StorageResult<CalculationMap> {
    match fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(CalculationMap::new()),
        Ok(content) => serde_json::from_str(&content).map_err(|e| {
            StorageError::serialization(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CalculationMap::new()),
        Err(e) => Err(StorageError::unavailable(format!(
            "Cannot read {}: {}",
            path.display(),
            e
        ))),
    }
}

#[async_trait]
impl CalculationBackend for FileBackend {
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

        let mut next = calculations.clone();
        next.insert(calculation.id.clone(), calculation);
        self.persist(&next).await?;
        *calculations = next;
        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<SavedCalculation>> {
        Ok(self.calculations.read().await.get(id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<SavedCalculation>> {
        Ok(self.calculations.read().await.values().cloned().collect())
    }

    async fn remove(&self, id: &str) -> StorageResult<bool> {
        let mut calculations = self.calculations.write().await;
        if !calculations.contains_key(id) {
            return Ok(false);
        }

        let mut next = calculations.clone();
        next.remove(id);
        self.persist(&next).await?;
        *calculations = next;
        Ok(true)
    }

    async fn clear(&self) -> StorageResult<usize> {
        let mut calculations = self.calculations.write().await;
        let removed = calculations.len();

        match fs::remove_file(&self.config.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::Io(e)),
        }
        calculations.clear();
        Ok(removed)
    }

    async fn len(&self) -> StorageResult<usize> {
        Ok(self.calculations.read().await.len())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        let entries = self.calculations.read().await.len();
        let probe = self.config.path.with_file_name(".health_check");
        let result = fs::write(&probe, "health_check").await;
        let _ = fs::remove_file(&probe).await;

        Ok(match result {
            Ok(_) => HealthStatus {
                healthy: true,
                backend_type: "file".to_string(),
                entries,
                errors: vec![],
            },
            Err(e) => {
                warn!("File storage health check failed: {}", e);
                HealthStatus {
                    healthy: false,
                    backend_type: "file".to_string(),
                    entries,
                    errors: vec![e.to_string()],
                }
            }
        })
    }
}
