//! Record store implementations:
//! - `postgres`: PostgreSQL with Diesel and row-level security
//! - `local`: in-memory store for tests and local development
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PostgresConfig, PostgresRepository};
