//! Student repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Page, StudentId, TenantId};
use crate::db::query::StudentQuery;
use crate::models::{NewStudent, Student, StudentChanges};

/// Student persistence, always scoped to one tenant.
///
/// Implementations must be `Send + Sync` to be shared across request tasks.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Student Operations ====================

    /// Filtered, counted page of students.
    ///
    /// Paged listings are newest first; the unpaged `all` listing is ordered
    /// by name ascending.
    async fn list_students(
        &self,
        tenant: TenantId,
        query: &StudentQuery,
    ) -> RepositoryResult<Page<Student>>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - absent or owned by another tenant
    async fn get_student(&self, tenant: TenantId, id: StudentId) -> RepositoryResult<Student>;

    async fn create_student(
        &self,
        tenant: TenantId,
        student: &NewStudent,
    ) -> RepositoryResult<Student>;

    async fn update_student(
        &self,
        tenant: TenantId,
        id: StudentId,
        changes: &StudentChanges,
    ) -> RepositoryResult<Student>;

    /// Delete a student and, by cascade, its enrollments.
    async fn delete_student(&self, tenant: TenantId, id: StudentId) -> RepositoryResult<()>;

    async fn count_students(&self, tenant: TenantId) -> RepositoryResult<usize>;
}
