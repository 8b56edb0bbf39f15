//! Tenant isolation and integrity rules of the in-memory record store.

mod support;

use enrollment_tracker::api::{StudentId, TenantId};
use enrollment_tracker::db::query::{EnrollmentQuery, StudentQuery};
use enrollment_tracker::db::repositories::LocalRepository;
use enrollment_tracker::db::{
    services, CourseRepository, EnrollmentRepository, RepositoryError, StudentRepository,
    DUPLICATE_ENROLLMENT,
};
use enrollment_tracker::models::{EnrollmentStatus, StudentDraft};

use support::{add_course, add_student, enrollment_draft};

#[tokio::test]
async fn test_listings_only_show_own_rows() {
    let repo = LocalRepository::new();
    let alice = TenantId::generate();
    let bob = TenantId::generate();

    add_student(&repo, alice, "Ada Lovelace").await;
    add_student(&repo, alice, "Alan Turing").await;
    add_student(&repo, bob, "Grace Hopper").await;

    let page = services::list_students(&repo, alice, &StudentQuery::page(1))
        .await
        .unwrap();
    assert_eq!(page.info.total, 2);
    assert!(page.data.iter().all(|s| s.owner_id == alice));

    let page = services::list_students(&repo, bob, &StudentQuery::all())
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Grace Hopper");
}

#[tokio::test]
async fn test_foreign_update_reads_as_missing() {
    let repo = LocalRepository::new();
    let owner = TenantId::generate();
    let intruder = TenantId::generate();
    let student = add_student(&repo, owner, "Ada Lovelace").await;

    let draft = StudentDraft {
        name: Some("Mallory".to_string()),
        ..Default::default()
    };
    let foreign = services::update_student(&repo, intruder, student.id, draft.clone())
        .await
        .unwrap_err();
    let missing = services::update_student(&repo, owner, StudentId(9_999), draft)
        .await
        .unwrap_err();

    assert!(foreign.is_not_found());
    assert!(missing.is_not_found());
    assert_eq!(foreign.message(), missing.message());

    let unchanged = repo.get_student(owner, student.id).await.unwrap();
    assert_eq!(unchanged.name, "Ada Lovelace");
}

#[tokio::test]
async fn test_foreign_delete_reads_as_missing() {
    let repo = LocalRepository::new();
    let owner = TenantId::generate();
    let intruder = TenantId::generate();
    let course = add_course(&repo, owner, "CS101").await;

    let err = services::delete_course(&repo, intruder, course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
    assert_eq!(repo.count_courses(owner).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_enrollment_conflicts_and_keeps_first() {
    let repo = LocalRepository::new();
    let tenant = TenantId::generate();
    let student = add_student(&repo, tenant, "Ada Lovelace").await;
    let course = add_course(&repo, tenant, "CS101").await;

    let first = services::create_enrollment(
        &repo,
        tenant,
        enrollment_draft(&student, &course, "Fall 2024"),
    )
    .await
    .unwrap();
    assert_eq!(first.status, EnrollmentStatus::Enrolled);

    let err = services::create_enrollment(
        &repo,
        tenant,
        enrollment_draft(&student, &course, "Fall 2024"),
    )
    .await
    .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.message(), DUPLICATE_ENROLLMENT);

    let stored = repo.get_enrollment(tenant, first.id).await.unwrap();
    assert_eq!(stored, first);
    assert_eq!(repo.count_enrollments(tenant).await.unwrap(), 1);

    // A different semester is a different slot.
    services::create_enrollment(
        &repo,
        tenant,
        enrollment_draft(&student, &course, "Spring 2025"),
    )
    .await
    .unwrap();
    assert_eq!(repo.count_enrollments(tenant).await.unwrap(), 2);
}

#[tokio::test]
async fn test_update_into_taken_slot_conflicts() {
    let repo = LocalRepository::new();
    let tenant = TenantId::generate();
    let student = add_student(&repo, tenant, "Ada Lovelace").await;
    let course = add_course(&repo, tenant, "CS101").await;

    services::create_enrollment(&repo, tenant, enrollment_draft(&student, &course, "Fall 2024"))
        .await
        .unwrap();
    let second = services::create_enrollment(
        &repo,
        tenant,
        enrollment_draft(&student, &course, "Spring 2025"),
    )
    .await
    .unwrap();

    let draft = enrollment_draft(&student, &course, "Fall 2024");
    let err = services::update_enrollment(&repo, tenant, second.id, draft)
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_enrollment_cannot_reference_foreign_rows() {
    let repo = LocalRepository::new();
    let owner = TenantId::generate();
    let other = TenantId::generate();
    let student = add_student(&repo, owner, "Ada Lovelace").await;
    let course = add_course(&repo, owner, "CS101").await;

    let err = services::create_enrollment(
        &repo,
        other,
        enrollment_draft(&student, &course, "Fall 2024"),
    )
    .await
    .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(repo.count_enrollments(other).await.unwrap(), 0);
}

#[tokio::test]
async fn test_course_delete_cascades_to_enrollments() {
    let repo = LocalRepository::new();
    let tenant = TenantId::generate();
    let ada = add_student(&repo, tenant, "Ada Lovelace").await;
    let alan = add_student(&repo, tenant, "Alan Turing").await;
    let cs101 = add_course(&repo, tenant, "CS101").await;
    let cs201 = add_course(&repo, tenant, "CS201").await;

    for (student, course) in [(&ada, &cs101), (&alan, &cs101), (&ada, &cs201)] {
        services::create_enrollment(&repo, tenant, enrollment_draft(student, course, "Fall 2024"))
            .await
            .unwrap();
    }

    services::delete_course(&repo, tenant, cs101.id).await.unwrap();

    let remaining = services::list_enrollments(&repo, tenant, &EnrollmentQuery::all())
        .await
        .unwrap();
    assert_eq!(remaining.data.len(), 1);
    assert_eq!(remaining.data[0].course_code, "CS201");
    assert!(repo.get_course(tenant, cs101.id).await.is_err());
    assert!(repo.get_course(tenant, cs201.id).await.is_ok());
}

#[tokio::test]
async fn test_student_delete_cascades_to_enrollments() {
    let repo = LocalRepository::new();
    let tenant = TenantId::generate();
    let ada = add_student(&repo, tenant, "Ada Lovelace").await;
    let course = add_course(&repo, tenant, "CS101").await;
    services::create_enrollment(&repo, tenant, enrollment_draft(&ada, &course, "Fall 2024"))
        .await
        .unwrap();

    services::delete_student(&repo, tenant, ada.id).await.unwrap();
    assert_eq!(repo.count_enrollments(tenant).await.unwrap(), 0);
    assert_eq!(repo.count_courses(tenant).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unhealthy_store_reports_connection_error() {
    let repo = LocalRepository::new();
    let tenant = TenantId::generate();
    repo.set_healthy(false);

    let err = repo.count_students(tenant).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
    assert!(!repo.check_health());

    repo.set_healthy(true);
    assert_eq!(repo.count_students(tenant).await.unwrap(), 0);
}
