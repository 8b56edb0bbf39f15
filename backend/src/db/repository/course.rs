//! Course repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{CourseId, Page, TenantId};
use crate::db::query::CourseQuery;
use crate::models::{Course, CourseChanges, NewCourse};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Filtered, counted page of courses, newest first (`all`: by name).
    async fn list_courses(
        &self,
        tenant: TenantId,
        query: &CourseQuery,
    ) -> RepositoryResult<Page<Course>>;

    async fn get_course(&self, tenant: TenantId, id: CourseId) -> RepositoryResult<Course>;

    async fn create_course(&self, tenant: TenantId, course: &NewCourse)
        -> RepositoryResult<Course>;

    async fn update_course(
        &self,
        tenant: TenantId,
        id: CourseId,
        changes: &CourseChanges,
    ) -> RepositoryResult<Course>;

    /// Delete a course and, by cascade, its enrollments.
    async fn delete_course(&self, tenant: TenantId, id: CourseId) -> RepositoryResult<()>;

    async fn count_courses(&self, tenant: TenantId) -> RepositoryResult<usize>;
}
