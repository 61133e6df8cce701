//! Paraquery Configuration Module
//! Handles loading and validating paraquery.config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub relational: RelationalConfig,
    pub document: DocumentConfig,
}

/// Relational backend settings. The engine is embedded, so the store is
/// addressed by a file path rather than host/port/credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationalConfig {
    #[serde(default = "default_relational_path")]
    pub path: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
}

/// Document backend settings. Collection names are case-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_relational_path() -> PathBuf {
    PathBuf::from("./data/relational.db")
}

fn default_document_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_table() -> String {
    "products".to_string()
}

fn default_collection() -> String {
    "Products".to_string()
}

impl Config {
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = project_dir.join("paraquery.config.json");
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }
        let content = std::fs::read_to_string(&config_path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the project config, falling back to defaults when no file exists.
    pub fn load_or_default(project_dir: &Path) -> Result<Self, ConfigError> {
        match Self::load(project_dir) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => {
                let mut config = Self::default_config();
                config.apply_env_overrides();
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, project_dir: &Path) -> Result<(), ConfigError> {
        let config_path = project_dir.join("paraquery.config.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn default_config() -> Self {
        Self {
            version: "0.1.0".to_string(),
            relational: RelationalConfig {
                path: default_relational_path(),
                table: default_table(),
            },
            document: DocumentConfig {
                path: default_document_path(),
                collection: default_collection(),
            },
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PARAQUERY_RELATIONAL_PATH") {
            self.relational.path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("PARAQUERY_DOCUMENT_PATH") {
            self.document.path = PathBuf::from(path);
        }
    }

    /// Resolve the relational database path against the project directory.
    pub fn relational_path(&self, project_dir: &Path) -> PathBuf {
        if self.relational.path.is_absolute() {
            self.relational.path.clone()
        } else {
            project_dir.join(&self.relational.path)
        }
    }

    /// Resolve the document store base path against the project directory.
    pub fn document_path(&self, project_dir: &Path) -> PathBuf {
        if self.document.path.is_absolute() {
            self.document.path.clone()
        } else {
            project_dir.join(&self.document.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();

        let config = Config::default_config();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.version, "0.1.0");
        assert_eq!(loaded.relational.table, "products");
        assert_eq!(loaded.document.collection, "Products");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.relational.table, "products");
    }
}
