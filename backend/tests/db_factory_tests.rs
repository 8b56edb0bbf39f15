//! Tests for db::factory and db::repo_config - backend selection and configuration.

mod support;

use std::io::Write;
use std::str::FromStr;

use enrollment_tracker::api::TenantId;
use enrollment_tracker::db::factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
use enrollment_tracker::db::{AuthSettings, RepositoryConfig, RepositoryError, StudentRepository};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_repository_type_from_str() {
    assert_eq!(
        RepositoryType::from_str("postgres").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(RepositoryType::from_str("PG").unwrap(), RepositoryType::Postgres);
    assert_eq!(RepositoryType::from_str("Local").unwrap(), RepositoryType::Local);
    assert_eq!(RepositoryType::from_str("memory").unwrap(), RepositoryType::Local);

    let err = RepositoryType::from_str("sqlite").unwrap_err();
    assert!(err.contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_from_env_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/enrollments")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", Some("postgres://localhost/enrollments")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_explicit_type_wins_over_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/enrollments")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_unparseable_type_falls_back_to_local() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("cassandra"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local)
    });
}

#[test]
fn test_session_ttl_from_env() {
    support::with_scoped_env(&[("SESSION_TTL_SECS", Some("120"))], || {
        assert_eq!(AuthSettings::from_env().session_ttl_secs, 120);
    });
    support::with_scoped_env(&[("SESSION_TTL_SECS", Some("soon"))], || {
        assert_eq!(AuthSettings::from_env().session_ttl_secs, 3600);
    });
    support::with_scoped_env(&[("SESSION_TTL_SECS", None)], || {
        assert_eq!(AuthSettings::from_env().session_ttl_secs, 3600);
    });
}

#[tokio::test]
async fn test_create_local_is_empty_and_healthy() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
    assert_eq!(repo.count_students(TenantId::generate()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_builder_with_explicit_local_type() {
    let repo = RepositoryBuilder::new()
        .repository_type(RepositoryType::Local)
        .build()
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_factory_from_local_config_file() {
    let file = config_file(
        r#"
[repository]
type = "local"

[auth]
session_ttl_secs = 900
"#,
    );

    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    assert_eq!(config.auth.session_ttl_secs, 900);

    let repo = RepositoryFactory::from_config_file(file.path()).await.unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_config_file_with_unknown_type() {
    let file = config_file("[repository]\ntype = \"cassandra\"\n");
    let config = RepositoryConfig::from_file(file.path()).unwrap();
    let err = config.repository_type().unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert!(err.to_string().contains("cassandra"));
}

#[test]
fn test_config_file_errors_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("repository.toml");
    let err = RepositoryConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    assert!(err.message().contains("Failed to read config file"));
    let details = err.context().details.clone().unwrap_or_default();
    assert!(details.ends_with("repository.toml"));

    let broken = config_file("[repository\ntype = ");
    let err = RepositoryConfig::from_file(broken.path()).unwrap_err();
    assert!(err.message().contains("Failed to parse config file"));
}

#[test]
fn test_postgres_config_requires_url() {
    let file = config_file("[repository]\ntype = \"postgres\"\n");
    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert!(config.to_postgres_config().is_err());
}

#[test]
fn test_builder_from_local_config_file() {
    let file = config_file("[repository]\ntype = \"local\"\n");
    assert!(RepositoryBuilder::new().from_config_file(file.path()).is_ok());
}
