use chrono::Utc;

use super::*;
use crate::api::{CourseId, EnrollmentId, StudentId, TenantId};

fn student(name: &str, email: &str, course: &str) -> Student {
    Student {
        id: StudentId(1),
        owner_id: TenantId::generate(),
        name: name.to_string(),
        email: email.to_string(),
        course: course.to_string(),
        created_at: Utc::now(),
    }
}

fn detail(student: &str, code: &str, semester: &str, grade: Option<Grade>) -> EnrollmentDetail {
    EnrollmentDetail {
        id: EnrollmentId(1),
        student_id: StudentId(1),
        course_id: CourseId(1),
        semester: semester.to_string(),
        status: EnrollmentStatus::Completed,
        grade,
        enrolled_at: Utc::now(),
        student_name: student.to_string(),
        student_email: "x@y.z".to_string(),
        course_code: code.to_string(),
        course_name: "Data Structures".to_string(),
        credits: 4,
    }
}

#[test]
fn test_total_pages_rounds_up() {
    assert_eq!(total_pages(25, 10), 3);
    assert_eq!(total_pages(20, 10), 2);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(0, 10), 0);
}

#[test]
fn test_page_below_one_is_page_one() {
    assert_eq!(PageRequest::new(Some(0)).page(), 1);
    assert_eq!(PageRequest::new(Some(-7)).page(), 1);
    assert_eq!(PageRequest::new(None).page(), 1);
    assert_eq!(PageRequest::new(Some(3)).offset(), 20);
}

#[test]
fn test_page_past_the_end_is_empty_with_true_total() {
    let rows: Vec<u32> = (0..25).collect();
    let page = PageRequest::new(Some(4)).paginate(rows.clone());
    assert!(page.data.is_empty());
    assert_eq!(page.info.total, 25);
    assert_eq!(page.info.total_pages, 3);

    let last = PageRequest::new(Some(3)).paginate(rows);
    assert_eq!(last.data, vec![20, 21, 22, 23, 24]);
}

#[test]
fn test_unpaged_listing() {
    let page = Listing::All.apply(vec!["a", "b"]);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.info.total_pages, 1);
    assert_eq!(Listing::All.apply(Vec::<u8>::new()).info.total_pages, 0);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let term = SearchTerm::parse(Some("  ADA ".to_string())).unwrap();
    assert_eq!(term.as_str(), "ADA");
    assert!(term.matches("Lovelace, Ada"));
    assert!(!term.matches("Grace"));
    assert!(SearchTerm::parse(Some("   ".to_string())).is_none());
}

#[test]
fn test_like_pattern_escapes_metacharacters() {
    let term = SearchTerm::parse(Some("50%_off".to_string())).unwrap();
    assert_eq!(term.like_pattern(), "%50\\%\\_off%");
}

#[test]
fn test_student_query_ors_search_and_ands_course() {
    let query = StudentQuery::new(
        Some("uni.edu".to_string()),
        Some("Physics".to_string()),
        Some(1),
        false,
    );
    assert!(query.matches(&student("Ada", "ada@uni.edu", "Physics")));
    assert!(!query.matches(&student("Ada", "ada@uni.edu", "Biology")));
    assert!(!query.matches(&student("Ada", "ada@mail.com", "Physics")));
}

#[test]
fn test_all_mode_drops_filters() {
    let query = StudentQuery::new(Some("zzz".to_string()), Some("X".to_string()), Some(5), true);
    assert_eq!(query, StudentQuery::all());
    assert!(query.matches(&student("Ada", "ada@uni.edu", "Physics")));
}

#[test]
fn test_enrollment_filters_combine() {
    let query = EnrollmentQuery::from_filters(EnrollmentFilters {
        search: Some("cs1".to_string()),
        semester: Some("Fall 2024".to_string()),
        grade: Some("A".to_string()),
        status: Some("completed".to_string()),
        page: None,
        all: false,
    })
    .unwrap();

    assert!(query.matches(&detail("Ada", "CS101", "Fall 2024", Some(Grade::A))));
    assert!(!query.matches(&detail("Ada", "CS101", "Spring 2025", Some(Grade::A))));
    assert!(!query.matches(&detail("Ada", "CS101", "Fall 2024", Some(Grade::B))));
    assert!(!query.matches(&detail("Ada", "CS101", "Fall 2024", None)));
    assert!(!query.matches(&detail("Ada", "MA201", "Fall 2024", Some(Grade::A))));
}

#[test]
fn test_enrollment_search_hits_student_name() {
    let query = EnrollmentQuery::from_filters(EnrollmentFilters {
        search: Some("lovelace".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(query.matches(&detail("Ada Lovelace", "CS101", "Fall 2024", None)));
}

#[test]
fn test_enrollment_filter_rejects_unknown_grade_and_status() {
    let err = EnrollmentQuery::from_filters(EnrollmentFilters {
        grade: Some("E".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err.fields, vec!["grade"]);

    let err = EnrollmentQuery::from_filters(EnrollmentFilters {
        status: Some("paused".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(err.fields, vec!["status"]);
}

#[test]
fn test_distinct_sorted() {
    let values = distinct_sorted(vec![
        "Fall 2024".to_string(),
        "Spring 2024".to_string(),
        "Fall 2024".to_string(),
        " ".to_string(),
    ]);
    assert_eq!(values, vec!["Fall 2024", "Spring 2024"]);
}
