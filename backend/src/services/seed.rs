//! Demo data for a fresh account.

use log::info;

use crate::api::{ClearSummary, SeedSummary, TenantId};
use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{EnrollmentStatus, Grade, NewCourse, NewEnrollment, NewStudent};
use crate::routes::seed::SEED_STUDENT_LIMIT;

/// (code, name, credits, department)
const DEMO_COURSES: [(&str, &str, i32, &str); 6] = [
    ("CS101", "Introduction to Programming", 4, "Computer Science"),
    ("CS201", "Data Structures", 4, "Computer Science"),
    ("MATH150", "Calculus I", 4, "Mathematics"),
    ("MATH220", "Linear Algebra", 3, "Mathematics"),
    ("PHYS110", "General Physics", 4, "Physics"),
    ("ENG105", "Academic Writing", 3, "English"),
];

/// (name, email, course of study)
const DEMO_STUDENTS: [(&str, &str, &str); 8] = [
    ("Alice Johnson", "alice.johnson@example.edu", "Computer Science"),
    ("Brian Lee", "brian.lee@example.edu", "Mathematics"),
    ("Carmen Diaz", "carmen.diaz@example.edu", "Physics"),
    ("David Okafor", "david.okafor@example.edu", "Computer Science"),
    ("Elena Petrova", "elena.petrova@example.edu", "Mathematics"),
    ("Farid Haddad", "farid.haddad@example.edu", "English"),
    ("Grace Kim", "grace.kim@example.edu", "Computer Science"),
    ("Hugo Martin", "hugo.martin@example.edu", "Physics"),
];

/// (student index, course index, semester, status, grade)
const DEMO_ENROLLMENTS: [(usize, usize, &str, EnrollmentStatus, Option<Grade>); 14] = [
    (0, 0, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::A)),
    (0, 1, "Spring 2025", EnrollmentStatus::Enrolled, None),
    (1, 2, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::BPlus)),
    (1, 3, "Spring 2025", EnrollmentStatus::Enrolled, None),
    (2, 4, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::AMinus)),
    (2, 2, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::B)),
    (3, 0, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::CPlus)),
    (3, 1, "Spring 2025", EnrollmentStatus::Dropped, None),
    (4, 3, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::APlus)),
    (4, 2, "Spring 2025", EnrollmentStatus::Enrolled, None),
    (5, 5, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::BMinus)),
    (6, 0, "Spring 2025", EnrollmentStatus::Enrolled, None),
    (6, 5, "Fall 2024", EnrollmentStatus::Completed, Some(Grade::A)),
    (7, 4, "Spring 2025", EnrollmentStatus::Enrolled, None),
];

/// Insert the demo roster for `tenant`.
///
/// Refused with a conflict once the tenant already holds more than
/// [`SEED_STUDENT_LIMIT`] students.
pub async fn seed_demo_data<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
) -> RepositoryResult<SeedSummary> {
    let existing = repo.count_students(tenant).await?;
    if existing > SEED_STUDENT_LIMIT {
        return Err(RepositoryError::conflict_with_context(
            format!(
                "Account already has {} students; seeding is only available for accounts with at most {}",
                existing, SEED_STUDENT_LIMIT
            ),
            ErrorContext::new("seed_demo_data").with_entity("student"),
        ));
    }

    let mut course_ids = Vec::with_capacity(DEMO_COURSES.len());
    for (code, name, credits, department) in DEMO_COURSES {
        let course = NewCourse {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            department: Some(department.to_string()),
        };
        course_ids.push(repo.create_course(tenant, &course).await?.id);
    }

    let mut student_ids = Vec::with_capacity(DEMO_STUDENTS.len());
    for (name, email, course) in DEMO_STUDENTS {
        let student = NewStudent {
            name: name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
        };
        student_ids.push(repo.create_student(tenant, &student).await?.id);
    }

    for (student, course, semester, status, grade) in DEMO_ENROLLMENTS {
        let enrollment = NewEnrollment {
            student_id: student_ids[student],
            course_id: course_ids[course],
            semester: semester.to_string(),
            status,
            grade,
        };
        repo.create_enrollment(tenant, &enrollment).await?;
    }

    let summary = SeedSummary {
        students: student_ids.len(),
        courses: course_ids.len(),
        enrollments: DEMO_ENROLLMENTS.len(),
    };
    info!(
        "Seeded tenant {} with {} students, {} courses, {} enrollments",
        tenant, summary.students, summary.courses, summary.enrollments
    );
    Ok(summary)
}

/// Remove every record owned by `tenant`.
pub async fn clear_tenant_data<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
) -> RepositoryResult<ClearSummary> {
    let summary = repo.clear_tenant(tenant).await?;
    info!(
        "Cleared tenant {}: {} students, {} courses, {} enrollments",
        tenant, summary.students, summary.courses, summary.enrollments
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::db::{CourseRepository, EnrollmentRepository, StudentRepository};

    #[test]
    fn test_demo_enrollments_reference_demo_rows() {
        for (student, course, ..) in DEMO_ENROLLMENTS {
            assert!(student < DEMO_STUDENTS.len());
            assert!(course < DEMO_COURSES.len());
        }
    }

    #[tokio::test]
    async fn test_seed_populates_tenant() {
        let repo = LocalRepository::new();
        let tenant = TenantId::generate();

        let summary = seed_demo_data(&repo, tenant).await.unwrap();
        assert_eq!(summary.students, DEMO_STUDENTS.len());
        assert_eq!(repo.count_students(tenant).await.unwrap(), DEMO_STUDENTS.len());
        assert_eq!(repo.count_courses(tenant).await.unwrap(), DEMO_COURSES.len());
        assert_eq!(
            repo.count_enrollments(tenant).await.unwrap(),
            DEMO_ENROLLMENTS.len()
        );

        let other = TenantId::generate();
        assert_eq!(repo.count_students(other).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_refused_above_limit() {
        let repo = LocalRepository::new();
        let tenant = TenantId::generate();

        // 8 then 16 students: the second run is allowed (8 <= 10), the third is not.
        seed_demo_data(&repo, tenant).await.unwrap();
        seed_demo_data(&repo, tenant).await.unwrap();
        let err = seed_demo_data(&repo, tenant).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.count_students(tenant).await.unwrap(), 16);
    }

    #[tokio::test]
    async fn test_clear_removes_only_own_rows() {
        let repo = LocalRepository::new();
        let tenant = TenantId::generate();
        let other = TenantId::generate();
        seed_demo_data(&repo, tenant).await.unwrap();
        seed_demo_data(&repo, other).await.unwrap();

        let summary = clear_tenant_data(&repo, tenant).await.unwrap();
        assert_eq!(summary.students, DEMO_STUDENTS.len());
        assert_eq!(summary.enrollments, DEMO_ENROLLMENTS.len());
        assert_eq!(repo.count_students(tenant).await.unwrap(), 0);
        assert_eq!(repo.count_courses(tenant).await.unwrap(), 0);
        assert_eq!(repo.count_students(other).await.unwrap(), DEMO_STUDENTS.len());
    }
}
