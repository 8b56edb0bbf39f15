//! Tenant-scoped storage for students, courses and enrollments.
//!
//! Storage sits behind the repository traits so the HTTP layer never knows
//! which backend is live.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer (http/) and dashboard services              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!          ┌──────────┴───────────┐
//!   repositories::postgres   repositories::local
//! ```
//!
//! # Modules
//! - `services`: validated mutations and tenant-scoped reads (use these!)
//! - `query`: search, filter and pagination inputs shared by both backends
//! - `repository`: trait definitions and [`RepositoryError`]
//! - `repositories::postgres`: Diesel implementation with row-level security
//! - `repositories::local`: in-memory implementation for tests and development
//! - `factory` / `repo_config`: backend selection at startup

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod query;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use query::{
    CourseQuery, DistinctField, EnrollmentFilters, EnrollmentQuery, Listing, PageRequest,
    SearchTerm, StudentQuery, PAGE_SIZE,
};
pub use repo_config::{AuthSettings, RepositoryConfig};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    AnalyticsRepository, CourseRepository, EnrollmentRepository, ErrorContext, FullRepository,
    RepositoryError, RepositoryResult, StudentRepository, DUPLICATE_ENROLLMENT,
};
