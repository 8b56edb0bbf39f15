//! Enrollment repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{EnrollmentId, Page, TenantId};
use crate::db::query::EnrollmentQuery;
use crate::models::{Enrollment, EnrollmentChanges, EnrollmentDetail, NewEnrollment};

/// Enrollment persistence.
///
/// The (student, course, semester) triple is unique per tenant; inserts or
/// updates that would duplicate it fail with [`RepositoryError::Conflict`].
///
/// [`RepositoryError::Conflict`]: super::RepositoryError::Conflict
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Filtered, counted page of enrollments joined with student and course,
    /// newest first.
    async fn list_enrollments(
        &self,
        tenant: TenantId,
        query: &EnrollmentQuery,
    ) -> RepositoryResult<Page<EnrollmentDetail>>;

    async fn get_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
    ) -> RepositoryResult<Enrollment>;

    /// Insert an enrollment. Callers have already checked that both
    /// references belong to `tenant`.
    async fn create_enrollment(
        &self,
        tenant: TenantId,
        enrollment: &NewEnrollment,
    ) -> RepositoryResult<Enrollment>;

    async fn update_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
        changes: &EnrollmentChanges,
    ) -> RepositoryResult<Enrollment>;

    async fn delete_enrollment(&self, tenant: TenantId, id: EnrollmentId)
        -> RepositoryResult<()>;

    async fn count_enrollments(&self, tenant: TenantId) -> RepositoryResult<usize>;
}
