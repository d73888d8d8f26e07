//! Storage configuration types and utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{StorageError, StorageResult};

/// Storage backend type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Process-lifetime storage (default)
    #[default]
    Memory,
    /// Single JSON document on disk
    File,
}

/// Main storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: BackendType,

    /// Backend-specific configuration
    pub backend_config: BackendConfig,

    /// Default number of entries returned by a recent-history listing
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

/// Backend-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendConfig {
    File(FileConfig),
    Memory(MemoryConfig),
}

/// File storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Path of the JSON document holding every calculation
    pub path: PathBuf,

    /// Refuse writes past this many stored calculations
    #[serde(default)]
    pub max_entries: Option<usize>,
}

/// Memory storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Refuse writes past this many stored calculations
    #[serde(default)]
    pub max_entries: Option<usize>,
}

fn default_recent_limit() -> usize {
    10
}

/// Default location of the calculations file (~/.profitshare/calculations.json)
pub fn default_file_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".profitshare"))
        .unwrap_or_else(|| PathBuf::from(".profitshare"))
        .join("calculations.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            backend_config: BackendConfig::Memory(MemoryConfig::default()),
            recent_limit: default_recent_limit(),
        }
    }
}

impl StorageConfig {
    /// In-memory storage with default settings
    pub fn memory() -> Self {
        Self::default()
    }

    /// File storage at the given path
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendType::File,
            backend_config: BackendConfig::File(FileConfig {
                path: path.into(),
                max_entries: None,
            }),
            recent_limit: default_recent_limit(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// - `PROFITSHARE_STORAGE_TYPE` - `memory` or `file`
    /// - `PROFITSHARE_STORAGE_PATH` - file backend path
    /// - `PROFITSHARE_MAX_ENTRIES` - optional quota for either backend
    /// - `PROFITSHARE_RECENT_LIMIT` - default history length
    pub fn from_env() -> StorageResult<Self> {
        let backend = match std::env::var("PROFITSHARE_STORAGE_TYPE") {
            Ok(value) => match value.to_lowercase().as_str() {
                "memory" => BackendType::Memory,
                "file" => BackendType::File,
                other => {
                    return Err(StorageError::configuration(format!(
                        "Unknown storage type '{}', expected 'memory' or 'file'",
                        other
                    )))
                }
            },
            Err(_) => BackendType::default(),
        };

        let max_entries = parse_env_usize("PROFITSHARE_MAX_ENTRIES")?;
        let recent_limit =
            parse_env_usize("PROFITSHARE_RECENT_LIMIT")?.unwrap_or_else(default_recent_limit);

        let backend_config = match backend {
            BackendType::Memory => BackendConfig::Memory(MemoryConfig { max_entries }),
            BackendType::File => BackendConfig::File(FileConfig {
                path: std::env::var("PROFITSHARE_STORAGE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_file_path()),
                max_entries,
            }),
        };

        Ok(Self {
            backend,
            backend_config,
            recent_limit,
        })
    }

    /// Switch to the file backend at `path`, keeping any configured quota
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        let max_entries = self.max_entries();
        self.backend = BackendType::File;
        self.backend_config = BackendConfig::File(FileConfig {
            path: path.into(),
            max_entries,
        });
        self
    }

    pub fn max_entries(&self) -> Option<usize> {
        match &self.backend_config {
            BackendConfig::File(cfg) => cfg.max_entries,
            BackendConfig::Memory(cfg) => cfg.max_entries,
        }
    }
}

fn parse_env_usize(name: &str) -> StorageResult<Option<usize>> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse::<usize>().map(Some).map_err(|e| {
            StorageError::configuration(format!("{} must be a positive integer: {}", name, e))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var("PROFITSHARE_STORAGE_TYPE");
        env::remove_var("PROFITSHARE_STORAGE_PATH");
        env::remove_var("PROFITSHARE_MAX_ENTRIES");
        env::remove_var("PROFITSHARE_RECENT_LIMIT");
    }

    #[test]
    fn test_backend_type_serialization() {
        assert_eq!(serde_json::to_string(&BackendType::File).unwrap(), r#""file""#);
        assert_eq!(
            serde_json::to_string(&BackendType::Memory).unwrap(),
            r#""memory""#
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();

        assert_eq!(config.backend, BackendType::Memory);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.max_entries(), None);
    }

    #[test]
    fn test_with_file_path_keeps_quota() {
        let config = StorageConfig {
            backend_config: BackendConfig::Memory(MemoryConfig {
                max_entries: Some(5),
            }),
            ..Default::default()
        }
        .with_file_path("/tmp/calcs.json");

        assert_eq!(config.backend, BackendType::File);
        assert_eq!(config.max_entries(), Some(5));
        match config.backend_config {
            BackendConfig::File(cfg) => assert_eq!(cfg.path, PathBuf::from("/tmp/calcs.json")),
            _ => panic!("Expected FileConfig"),
        }
    }

    #[test]
    fn test_default_file_path_name() {
        assert!(default_file_path().ends_with(".profitshare/calculations.json"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.backend, BackendType::Memory);
        assert_eq!(config.recent_limit, 10);
    }

    #[test]
    #[serial]
    fn test_from_env_file_backend() {
        clear_env();
        env::set_var("PROFITSHARE_STORAGE_TYPE", "FILE");
        env::set_var("PROFITSHARE_STORAGE_PATH", "/custom/calcs.json");
        env::set_var("PROFITSHARE_MAX_ENTRIES", "100");
        env::set_var("PROFITSHARE_RECENT_LIMIT", "25");

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.backend, BackendType::File);
        assert_eq!(config.recent_limit, 25);
        match config.backend_config {
            BackendConfig::File(cfg) => {
                assert_eq!(cfg.path, PathBuf::from("/custom/calcs.json"));
                assert_eq!(cfg.max_entries, Some(100));
            }
            _ => panic!("Expected FileConfig"),
        }

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_backend() {
        clear_env();
        env::set_var("PROFITSHARE_STORAGE_TYPE", "redis");

        let err = StorageConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("Unknown storage type 'redis'"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_quota() {
        clear_env();
        env::set_var("PROFITSHARE_MAX_ENTRIES", "lots");

        assert!(StorageConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_backend_config_untagged() {
        let cfg: BackendConfig = serde_json::from_str(r#"{"path": "/data/c.json"}"#).unwrap();
        assert!(matches!(cfg, BackendConfig::File(_)));

        let cfg: BackendConfig = serde_json::from_str(r#"{"max_entries": 3}"#).unwrap();
        match cfg {
            BackendConfig::Memory(m) => assert_eq!(m.max_entries, Some(3)),
            _ => panic!("Expected MemoryConfig"),
        }
    }
}
