//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
use super::repositories::{SqliteConfig, SqliteRepository};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// SQLite + Diesel implementation
    Sqlite,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("sqlite", "local")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(Self::Sqlite),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Sqlite if a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() {
            Self::Sqlite
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use ssc_rust::db::{RepositoryFactory, RepositoryType};
///
/// let local_repo = RepositoryFactory::create_local();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `sqlite_config` - Optional database configuration (required for SQLite)
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Boxed repository instance
    /// * `Err(RepositoryError)` - If creation fails
    #[cfg(feature = "sqlite-repo")]
    pub fn create(
        repo_type: RepositoryType,
        sqlite_config: Option<&SqliteConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Sqlite => {
                let config = sqlite_config.ok_or_else(|| {
                    RepositoryError::configuration("SQLite repository requires SqliteConfig")
                })?;
                let repo = Self::create_sqlite(config)?;
                Ok(repo as Arc<dyn FullRepository>)
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a repository instance based on type (SQLite feature disabled).
    #[cfg(not(feature = "sqlite-repo"))]
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Sqlite => Err(RepositoryError::configuration(
                "SQLite repository feature not enabled",
            )),
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a SQLite repository.
    ///
    /// # Arguments
    /// * `config` - SQLite configuration
    ///
    /// # Returns
    /// * `Ok(Arc<SqliteRepository>)` - SQLite repository instance
    /// * `Err(RepositoryError)` - If initialization fails
    #[cfg(feature = "sqlite-repo")]
    pub fn create_sqlite(config: &SqliteConfig) -> RepositoryResult<Arc<SqliteRepository>> {
        let repo = SqliteRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    ///
    /// # Returns
    /// Boxed local repository instance
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to determine which repository to create.
    /// Defaults to SQLite if a database URL is set, otherwise Local.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env();

        match repo_type {
            #[cfg(feature = "sqlite-repo")]
            RepositoryType::Sqlite => {
                let config = SqliteConfig::from_env();
                Self::create(RepositoryType::Sqlite, Some(&config))
            }
            #[cfg(not(feature = "sqlite-repo"))]
            RepositoryType::Sqlite => Err(RepositoryError::configuration(
                "SQLite repository feature not enabled",
            )),
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }
}
