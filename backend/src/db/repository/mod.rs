//! Repository trait definitions for the record store.
//!
//! Responsibilities are split across focused traits, one per entity plus an
//! analytics trait for the aggregate reads the dashboard and seed endpoints
//! need. Every method takes the calling tenant explicitly; no implementation
//! may return or touch a row owned by another tenant.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`student`]: Student CRUD and listing
//! - [`course`]: Course CRUD and listing
//! - [`enrollment`]: Enrollment CRUD and joined listing
//! - [`analytics`]: Dashboard facts, distinct values, tenant wipe
//!
//! # Convenience Trait Bound
//!
//! Functions that need every capability use [`FullRepository`]:
//!
//! ```ignore
//! async fn roster<R: FullRepository>(repo: &R, tenant: TenantId) -> RepositoryResult<usize> {
//!     repo.count_students(tenant).await
//! }
//! ```

pub mod analytics;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod student;

pub use error::{ErrorContext, RepositoryError, RepositoryResult, DUPLICATE_ENROLLMENT};

pub use analytics::AnalyticsRepository;
pub use course::CourseRepository;
pub use enrollment::EnrollmentRepository;
pub use student::StudentRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all four
/// repository traits.
pub trait FullRepository:
    StudentRepository + CourseRepository + EnrollmentRepository + AnalyticsRepository
{
}

impl<T> FullRepository for T where
    T: StudentRepository + CourseRepository + EnrollmentRepository + AnalyticsRepository
{
}
