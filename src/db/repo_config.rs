//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
#[cfg(feature = "sqlite-repo")]
use super::repositories::SqliteConfig;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub sqlite: SqliteSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_database_url() -> String {
    "study_companion.db".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `repository.toml` in the current directory and its
    /// parent.
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = vec![
            PathBuf::from("repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Convert to SqliteConfig if this is a SQLite configuration.
    #[cfg(feature = "sqlite-repo")]
    pub fn to_sqlite_config(&self) -> Result<Option<SqliteConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Sqlite {
            return Ok(None);
        }

        if self.sqlite.database_url.is_empty() {
            return Err(RepositoryError::configuration(
                "SQLite repository requires 'sqlite.database_url' setting",
            ));
        }

        Ok(Some(SqliteConfig {
            database_url: self.sqlite.database_url.clone(),
            max_pool_size: self.sqlite.max_connections,
            connection_timeout_sec: self.sqlite.connect_timeout,
            max_retries: self.sqlite.max_retries,
            retry_delay_ms: self.sqlite.retry_delay_ms,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[repository]
type = "local"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    }

    #[test]
    fn test_sqlite_settings_defaults() {
        let toml = r#"
[repository]
type = "sqlite"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sqlite.database_url, "study_companion.db");
        assert_eq!(config.sqlite.max_connections, 4);
    }

    #[cfg(feature = "sqlite-repo")]
    #[test]
    fn test_parse_sqlite_config() {
        let toml = r#"
[repository]
type = "sqlite"

[sqlite]
database_url = "companion-data.db"
max_connections = 2
connect_timeout = 15
max_retries = 5
retry_delay_ms = 250
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Sqlite);

        let sqlite_config = config.to_sqlite_config().unwrap().unwrap();
        assert_eq!(sqlite_config.database_url, "companion-data.db");
        assert_eq!(sqlite_config.max_pool_size, 2);
        assert_eq!(sqlite_config.connection_timeout_sec, 15);
        assert_eq!(sqlite_config.max_retries, 5);
        assert_eq!(sqlite_config.retry_delay_ms, 250);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let toml = r#"
[repository]
type = "mystery"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert!(config.repository_type().is_err());
    }
}
