//! Application configuration
//!
//! Combines CLI verbosity with storage and server settings from the environment.

use crate::error::{ErrorCode, ProfitShareError};
use crate::storage::StorageConfig;
use anyhow::Result;
use std::path::PathBuf;

/// Address the API server binds when `PROFITSHARE_BIND` is unset
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Calculation storage settings
    pub storage: StorageConfig,
    /// Socket address for the API server
    pub bind_addr: String,
}

impl AppConfig {
    /// Create a new application configuration with default storage
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Load configuration from the environment
    ///
    /// Storage variables are read by [`StorageConfig::from_env`]; the bind
    /// address comes from `PROFITSHARE_BIND`.
    pub fn from_env(verbose: u8) -> Result<Self> {
        let storage = StorageConfig::from_env().map_err(|e| {
            ProfitShareError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, e.to_string())
        })?;
        let bind_addr =
            std::env::var("PROFITSHARE_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            verbose,
            storage,
            bind_addr,
        })
    }

    /// Use file storage at `path`
    pub fn with_storage_path(mut self, path: PathBuf) -> Self {
        self.storage = self.storage.with_file_path(path);
        self
    }

    /// Override the bind address
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            2 => "trace",
            _ => "trace,hyper=debug,tower=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            storage: StorageConfig::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BackendType;
    use serial_test::serial;

    #[test]
    fn test_log_level_by_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(2).log_level(), "trace");
        assert_eq!(AppConfig::new(5).log_level(), "trace,hyper=debug,tower=debug");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_bind_address() {
        std::env::set_var("PROFITSHARE_BIND", "0.0.0.0:8080");
        std::env::remove_var("PROFITSHARE_STORAGE_TYPE");
        let config = AppConfig::from_env(1).unwrap();
        std::env::remove_var("PROFITSHARE_BIND");

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.verbose, 1);
        assert_eq!(config.storage.backend, BackendType::Memory);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_backend() {
        std::env::set_var("PROFITSHARE_STORAGE_TYPE", "postgres");
        let result = AppConfig::from_env(0);
        std::env::remove_var("PROFITSHARE_STORAGE_TYPE");

        let err = result.unwrap_err();
        let err = err.downcast_ref::<ProfitShareError>().unwrap();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_storage_path_switches_to_file_backend() {
        let config = AppConfig::default().with_storage_path(PathBuf::from("/tmp/calcs.json"));
        assert_eq!(config.storage.backend, BackendType::File);
    }
}
