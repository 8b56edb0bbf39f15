//! Dashboard and legacy statistics assembly.
//!
//! Fetches raw facts through the repository and hands them to the pure
//! functions in [`super::aggregator`].

use log::warn;

use super::aggregator::{
    course_popularity, department_counts, grade_distribution, recent_activity, status_counts,
    weighted_gpa, RECENT_ACTIVITY_LIMIT,
};
use crate::api::{DashboardData, LegacyStats, TenantId};
use crate::db::repository::{FullRepository, RepositoryResult};

/// A failed sub-fetch degrades to an empty section instead of failing the
/// whole dashboard.
fn or_empty<T: Default>(section: &str, tenant: TenantId, result: RepositoryResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Dashboard section '{}' unavailable for tenant {}: {}",
                section, tenant, e
            );
            T::default()
        }
    }
}

/// Build the full dashboard bundle for one tenant.
///
/// All sub-fetches run concurrently. None of them can fail the response.
pub async fn build_dashboard<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
) -> DashboardData {
    let (students, courses, enrollments, facts, departments, recent) = tokio::join!(
        repo.count_students(tenant),
        repo.count_courses(tenant),
        repo.count_enrollments(tenant),
        repo.enrollment_facts(tenant),
        repo.course_departments(tenant),
        repo.recent_enrollments(tenant, RECENT_ACTIVITY_LIMIT),
    );

    let facts = or_empty("enrollments", tenant, facts);
    let departments = or_empty("departments", tenant, departments);
    let recent = or_empty("recent activity", tenant, recent);

    DashboardData {
        total_students: or_empty("student count", tenant, students),
        total_courses: or_empty("course count", tenant, courses),
        total_enrollments: or_empty("enrollment count", tenant, enrollments),
        gpa: weighted_gpa(&facts),
        grade_distribution: grade_distribution(&facts),
        course_popularity: course_popularity(&facts),
        department_counts: department_counts(departments.iter().map(|d| d.as_deref())),
        status_counts: status_counts(&facts),
        recent_activity: recent_activity(&recent),
    }
}

/// Totals, active enrollment count and average GPA in the pre-dashboard shape.
///
/// Unlike the dashboard, a failed fetch here is an error.
pub async fn legacy_stats<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
) -> RepositoryResult<LegacyStats> {
    let total_students = repo.count_students(tenant).await?;
    let total_courses = repo.count_courses(tenant).await?;
    let facts = repo.enrollment_facts(tenant).await?;

    Ok(LegacyStats {
        total_students,
        total_courses,
        total_enrollments: facts.len(),
        active_enrollments: status_counts(&facts).enrolled,
        average_gpa: weighted_gpa(&facts),
    })
}
