//! High-level record service layer.
//!
//! Repository-agnostic operations that carry the mutation rules every backend
//! must share: request drafts are validated before the store is contacted,
//! updates and deletes first confirm the target exists for the tenant, and
//! enrollments may only reference the tenant's own students and courses.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  HTTP handlers (http/handlers.rs)            │
//! └───────────────────┬──────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────┐
//! │  Service Layer (services.rs)                 │
//! │  - draft validation                          │
//! │  - existence and ownership checks            │
//! └───────────────────┬──────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────┐
//! │  Repository Traits (repository/)             │
//! └───────────────────┬──────────────────────────┘
//!          ┌──────────┴───────────┐
//! ┌────────▼─────────┐  ┌─────────▼──────────────┐
//! │ Postgres (RLS)   │  │ Local (in-memory)      │
//! └──────────────────┘  └────────────────────────┘
//! ```

use log::{info, warn};

use super::query::{CourseQuery, DistinctField, EnrollmentQuery, StudentQuery};
use super::repository::{FullRepository, RepositoryResult};
use crate::api::{CourseId, EnrollmentId, Page, StudentId, TenantId};
use crate::models::{
    Course, CourseDraft, Enrollment, EnrollmentDetail, EnrollmentDraft, Student, StudentDraft,
};

// ==================== Health & Connection ====================

/// Pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Students ====================

pub async fn list_students<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    query: &StudentQuery,
) -> RepositoryResult<Page<Student>> {
    repo.list_students(tenant, query).await
}

/// Validate and insert a student.
///
/// # Returns
/// * `Err(RepositoryError::ValidationError)` - name, email or course missing;
///   the store is not contacted
pub async fn create_student<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    draft: StudentDraft,
) -> RepositoryResult<Student> {
    let student = draft.into_new()?;
    let stored = repo.create_student(tenant, &student).await?;
    info!("Created student {} for tenant {}", stored.id, tenant);
    Ok(stored)
}

/// Apply the supplied fields to an existing student.
///
/// A student that is missing and one owned by another tenant both report the
/// same not-found error.
pub async fn update_student<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    id: StudentId,
    draft: StudentDraft,
) -> RepositoryResult<Student> {
    let changes = draft.into_changes()?;
    repo.get_student(tenant, id).await?;
    repo.update_student(tenant, id, &changes).await
}

/// Delete a student together with its enrollments.
pub async fn delete_student<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    id: StudentId,
) -> RepositoryResult<()> {
    repo.get_student(tenant, id).await?;
    repo.delete_student(tenant, id).await?;
    info!("Deleted student {} for tenant {}", id, tenant);
    Ok(())
}

// ==================== Courses ====================

pub async fn list_courses<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    query: &CourseQuery,
) -> RepositoryResult<Page<Course>> {
    repo.list_courses(tenant, query).await
}

pub async fn create_course<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    draft: CourseDraft,
) -> RepositoryResult<Course> {
    let course = draft.into_new()?;
    let stored = repo.create_course(tenant, &course).await?;
    info!("Created course {} ({}) for tenant {}", stored.id, stored.code, tenant);
    Ok(stored)
}

pub async fn update_course<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    id: CourseId,
    draft: CourseDraft,
) -> RepositoryResult<Course> {
    let changes = draft.into_changes()?;
    repo.get_course(tenant, id).await?;
    repo.update_course(tenant, id, &changes).await
}

/// Delete a course together with its enrollments.
pub async fn delete_course<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    id: CourseId,
) -> RepositoryResult<()> {
    repo.get_course(tenant, id).await?;
    repo.delete_course(tenant, id).await?;
    info!("Deleted course {} for tenant {}", id, tenant);
    Ok(())
}

// ==================== Enrollments ====================

pub async fn list_enrollments<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    query: &EnrollmentQuery,
) -> RepositoryResult<Page<EnrollmentDetail>> {
    repo.list_enrollments(tenant, query).await
}

/// Validate and insert an enrollment.
///
/// Both references must resolve to the tenant's own student and course.
/// A second enrollment for the same (student, course, semester) is a
/// conflict.
pub async fn create_enrollment<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    draft: EnrollmentDraft,
) -> RepositoryResult<Enrollment> {
    let enrollment = draft.into_new()?;
    repo.get_student(tenant, enrollment.student_id).await?;
    repo.get_course(tenant, enrollment.course_id).await?;

    match repo.create_enrollment(tenant, &enrollment).await {
        Ok(stored) => {
            info!(
                "Enrolled student {} in course {} ({}) for tenant {}",
                stored.student_id, stored.course_id, stored.semester, tenant
            );
            Ok(stored)
        }
        Err(e) => {
            if e.is_conflict() {
                warn!(
                    "Duplicate enrollment of student {} in course {} for {}",
                    enrollment.student_id, enrollment.course_id, enrollment.semester
                );
            }
            Err(e)
        }
    }
}

/// Change semester, status or grade of an enrollment.
pub async fn update_enrollment<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    id: EnrollmentId,
    draft: EnrollmentDraft,
) -> RepositoryResult<Enrollment> {
    let changes = draft.into_changes()?;
    repo.get_enrollment(tenant, id).await?;
    repo.update_enrollment(tenant, id, &changes).await
}

pub async fn delete_enrollment<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    id: EnrollmentId,
) -> RepositoryResult<()> {
    repo.get_enrollment(tenant, id).await?;
    repo.delete_enrollment(tenant, id).await
}

// ==================== Filter values ====================

pub async fn distinct_values<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    field: DistinctField,
) -> RepositoryResult<Vec<String>> {
    repo.distinct_values(tenant, field).await
}
