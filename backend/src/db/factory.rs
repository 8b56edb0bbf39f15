//! Repository factory for dependency injection.
//!
//! Picks the storage backend at startup from the environment or from a
//! `repository.toml` file.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::db::PostgresConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("postgres", "pg", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, Postgres is chosen when a
    /// `DATABASE_URL` is present and Local otherwise.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

#[cfg(not(feature = "postgres-repo"))]
fn feature_disabled() -> RepositoryError {
    RepositoryError::configuration("Postgres repository feature not enabled")
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use enrollment_tracker::db::{RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryFactory::create(RepositoryType::Local, None).await?;
///     assert!(repo.health_check().await?);
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `postgres_config` - Database configuration (required for Postgres)
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    RepositoryError::configuration("Postgres repository requires PostgresConfig")
                })?;
                Self::create_postgres_dyn(config).await
            }
        }
    }

    /// Create a Postgres repository, running pending migrations.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Repository init panicked: {}", e)))??;
        Ok(Arc::new(repo))
    }

    #[cfg(feature = "postgres-repo")]
    async fn create_postgres_dyn(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let pg = Self::create_postgres(config).await?;
        Ok(pg as Arc<dyn FullRepository>)
    }

    #[cfg(not(feature = "postgres-repo"))]
    async fn create_postgres_dyn(
        _config: &PostgresConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        Err(feature_disabled())
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// See [`RepositoryType::from_env`] for how the backend is chosen.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => {
                let config = postgres_config_from_env()?;
                Self::create_postgres_dyn(&config).await
            }
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from an already loaded configuration.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let postgres_config = config.to_postgres_config()?;
        Self::create(config.repository_type()?, postgres_config.as_ref()).await
    }
}

#[cfg(feature = "postgres-repo")]
fn postgres_config_from_env() -> RepositoryResult<PostgresConfig> {
    PostgresConfig::from_env().map_err(RepositoryError::configuration)
}

#[cfg(not(feature = "postgres-repo"))]
fn postgres_config_from_env() -> RepositoryResult<PostgresConfig> {
    Err(feature_disabled())
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use enrollment_tracker::db::{RepositoryBuilder, RepositoryType};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct RepositoryBuilder {
    repo_type: Option<RepositoryType>,
    postgres_config: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = Some(repo_type);
        self
    }

    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Take type and Postgres settings from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(mut self, config_path: P) -> RepositoryResult<Self> {
        let config = RepositoryConfig::from_file(config_path)?;
        self.repo_type = Some(config.repository_type()?);
        self.postgres_config = config.to_postgres_config()?;
        Ok(self)
    }

    /// Build the repository. Without an explicit type the environment decides,
    /// and a missing Postgres configuration is read from the environment too.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = self.repo_type.unwrap_or_else(RepositoryType::from_env);
        let postgres_config = match (repo_type, self.postgres_config) {
            (RepositoryType::Postgres, None) => Some(postgres_config_from_env()?),
            (_, config) => config,
        };
        RepositoryFactory::create(repo_type, postgres_config.as_ref()).await
    }
}
