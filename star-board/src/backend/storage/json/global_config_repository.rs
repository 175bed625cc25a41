//! # Global Config Repository
//!
//! Global settings live in a single YAML file at the root of the data directory:
//!
//! ```yaml
//! storage_key: "star_board_v1"
//! backup_file_name: "star-board-backup.json"
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```
//!
//! The file is created with defaults the first time it is read.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;

use super::connection::JsonConnection;

pub const DEFAULT_STORAGE_KEY: &str = "star_board_v1";
pub const DEFAULT_BACKUP_FILE_NAME: &str = "star-board-backup.json";

/// Global configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Name (without extension) of the board document file
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// File name suggested for JSON backups
    #[serde(default = "default_backup_file_name")]
    pub backup_file_name: String,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_backup_file_name() -> String {
    DEFAULT_BACKUP_FILE_NAME.to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            storage_key: default_storage_key(),
            backup_file_name: default_backup_file_name(),
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Storage trait for global configuration operations
pub trait GlobalConfigStorage: Send + Sync {
    /// Get the global configuration, creating it if it does not exist yet
    fn get_global_config(&self) -> Result<GlobalConfig>;
}

/// YAML-file global config repository
#[derive(Debug, Clone)]
pub struct GlobalConfigRepository {
    connection: JsonConnection,
}

impl GlobalConfigRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn load_or_create_global_config(&self) -> Result<GlobalConfig> {
        let config_path = self.connection.global_config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: GlobalConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {:?}", config_path))?;
            debug!("Loaded global config from {:?}", config_path);
            Ok(config)
        } else {
            let config = GlobalConfig::default();
            self.save_global_config(&config)?;
            info!("Created default global config at {:?}", config_path);
            Ok(config)
        }
    }

    fn save_global_config(&self, config: &GlobalConfig) -> Result<()> {
        let config_path = self.connection.global_config_path();
        let yaml_content = serde_yaml::to_string(config)?;
        self.connection.write_atomic(&config_path, yaml_content.as_bytes())?;
        debug!("Saved global config to {:?}", config_path);
        Ok(())
    }
}

impl GlobalConfigStorage for GlobalConfigRepository {
    fn get_global_config(&self) -> Result<GlobalConfig> {
        self.load_or_create_global_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::TestEnvironment;

    #[test]
    fn test_default_config_created_on_first_read() {
        let env = TestEnvironment::new().unwrap();
        let repo = GlobalConfigRepository::new(env.connection.clone());

        let config = repo.get_global_config().unwrap();

        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.backup_file_name, DEFAULT_BACKUP_FILE_NAME);
        assert_eq!(config.data_format_version, "1.0");
        assert!(env.connection.global_config_path().exists());
    }


    #[test]
    fn test_second_read_loads_created_file() {
        let env = TestEnvironment::new().unwrap();
        let repo = GlobalConfigRepository::new(env.connection.clone());

        let first = repo.get_global_config().unwrap();
        let second = repo.get_global_config().unwrap();

        assert_eq!(second, first);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let env = TestEnvironment::new().unwrap();
        fs::write(
            env.connection.global_config_path(),
            "data_format_version: \"1.0\"\ncreated_at: \"2025-01-01T00:00:00Z\"\nupdated_at: \"2025-01-01T00:00:00Z\"\n",
        )
        .unwrap();
        let repo = GlobalConfigRepository::new(env.connection.clone());

        let config = repo.get_global_config().unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.backup_file_name, DEFAULT_BACKUP_FILE_NAME);
    }
}
