use chrono::{TimeZone, Utc};

use super::*;
use crate::api::{CourseId, EnrollmentId, StudentId};

fn fact(grade: Option<&str>, status: &str, credits: i32, code: &str) -> EnrollmentFact {
    EnrollmentFact::new(grade, status, credits, code)
}

fn row(id: i64, grade: Option<Grade>, day: u32) -> EnrollmentDetail {
    EnrollmentDetail {
        id: EnrollmentId(id),
        student_id: StudentId(1),
        course_id: CourseId(1),
        semester: "Fall 2024".to_string(),
        status: EnrollmentStatus::Enrolled,
        grade,
        enrolled_at: Utc.with_ymd_and_hms(2024, 9, day, 14, 30, 0).unwrap(),
        student_name: "Ada Lovelace".to_string(),
        student_email: "ada@uni.edu".to_string(),
        course_code: "CS101".to_string(),
        course_name: "Intro to Programming".to_string(),
        credits: 3,
    }
}

#[test]
fn test_gpa_equal_credits() {
    let facts = vec![
        fact(Some("A"), "completed", 3, "CS101"),
        fact(Some("C"), "completed", 3, "MA201"),
    ];
    assert_eq!(weighted_gpa(&facts), Gpa::Value(3.0));
    assert_eq!(weighted_gpa(&facts).to_string(), "3.00");
}

#[test]
fn test_gpa_weights_by_credits() {
    // (4.0 * 4 + 2.0 * 1) / 5 = 3.6
    let facts = vec![
        fact(Some("A"), "completed", 4, "CS101"),
        fact(Some("C"), "completed", 1, "PE100"),
    ];
    assert_eq!(weighted_gpa(&facts), Gpa::Value(3.6));
}

#[test]
fn test_gpa_rounds_to_two_decimals() {
    // (3.7 + 3.3 + 3.0) / 3 = 3.333..
    let facts = vec![
        fact(Some("A-"), "completed", 3, "A"),
        fact(Some("B+"), "completed", 3, "B"),
        fact(Some("B"), "completed", 3, "C"),
    ];
    assert_eq!(weighted_gpa(&facts), Gpa::Value(3.33));
}

#[test]
fn test_gpa_without_grades_is_no_data() {
    assert_eq!(weighted_gpa(&[]), Gpa::NoData);
    let ungraded = vec![
        fact(None, "enrolled", 3, "CS101"),
        fact(Some("Q"), "enrolled", 3, "CS102"),
    ];
    assert_eq!(weighted_gpa(&ungraded), Gpa::NoData);
    assert_eq!(weighted_gpa(&ungraded).to_string(), "N/A");
}

#[test]
fn test_gpa_counts_repeated_course_twice() {
    let facts = vec![
        fact(Some("F"), "completed", 3, "CS101"),
        fact(Some("A"), "completed", 3, "CS101"),
    ];
    assert_eq!(weighted_gpa(&facts), Gpa::Value(2.0));
}

#[test]
fn test_grade_distribution_skips_unknown() {
    let facts = vec![
        fact(Some("A"), "completed", 3, "CS101"),
        fact(Some("A"), "completed", 3, "CS102"),
        fact(Some("B-"), "completed", 3, "CS103"),
        fact(Some("Z"), "completed", 3, "CS104"),
        fact(None, "enrolled", 3, "CS105"),
    ];
    let dist = grade_distribution(&facts);
    assert_eq!(dist.get("A"), Some(&2));
    assert_eq!(dist.get("B-"), Some(&1));
    assert_eq!(dist.values().sum::<usize>(), 3);
}

#[test]
fn test_course_popularity_orders_by_count() {
    let facts = vec![
        fact(None, "enrolled", 3, "MA201"),
        fact(None, "enrolled", 3, "CS101"),
        fact(None, "enrolled", 3, "CS101"),
        fact(None, "enrolled", 3, "BI110"),
    ];
    let popularity = course_popularity(&facts);
    assert_eq!(popularity[0].course, "CS101");
    assert_eq!(popularity[0].count, 2);
    assert_eq!(popularity[1].course, "BI110");
    assert_eq!(popularity.len(), 3);
}

#[test]
fn test_department_counts_ignore_unlabelled() {
    let departments = [Some("Science"), None, Some("Science"), Some("Arts"), Some(" ")];
    let counts = department_counts(departments);
    assert_eq!(counts.get("Science"), Some(&2));
    assert_eq!(counts.get("Arts"), Some(&1));
    assert_eq!(counts.len(), 2);
}

#[test]
fn test_status_counts_ignore_unknown() {
    let facts = vec![
        fact(None, "enrolled", 3, "A"),
        fact(None, "Completed", 3, "B"),
        fact(None, "dropped", 3, "C"),
        fact(None, "withdrawn", 3, "D"),
    ];
    assert_eq!(
        status_counts(&facts),
        StatusCounts {
            enrolled: 1,
            completed: 1,
            dropped: 1,
        }
    );
}

#[test]
fn test_recent_activity_projection() {
    let rows = vec![row(2, Some(Grade::BPlus), 3), row(1, None, 1)];
    let feed = recent_activity(&rows);
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].course, "CS101 — Intro to Programming");
    assert_eq!(feed[0].grade, "B+");
    assert_eq!(feed[0].date, "2024-09-03");
    assert_eq!(feed[1].grade, PENDING_GRADE);
}

#[test]
fn test_recent_activity_is_bounded() {
    let rows: Vec<_> = (1..=8).map(|i| row(i, None, i as u32)).collect();
    assert_eq!(recent_activity(&rows).len(), RECENT_ACTIVITY_LIMIT);
}

#[test]
fn test_fact_from_detail() {
    let fact = EnrollmentFact::from(&row(1, Some(Grade::AMinus), 2));
    assert_eq!(fact.grade.as_deref(), Some("A-"));
    assert_eq!(fact.status, "enrolled");
    assert_eq!(fact.credits, 3);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn any_grade() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            prop::sample::select(Grade::all().map(|g| g.as_str()).collect::<Vec<_>>())
                .prop_map(|g| Some(g.to_string())),
            "[a-z]{1,3}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn distribution_sums_to_recognized_grades(
            grades in prop::collection::vec(any_grade(), 0..40),
        ) {
            let facts: Vec<_> = grades
                .into_iter()
                .map(|g| EnrollmentFact { grade: g, status: "completed".into(), credits: 3, course_code: "X".into() })
                .collect();
            let recognized = facts.iter().filter(|f| f.recognized_grade().is_some()).count();
            prop_assert_eq!(grade_distribution(&facts).values().sum::<usize>(), recognized);
        }

        #[test]
        fn gpa_stays_on_scale(
            rows in prop::collection::vec((any_grade(), 1i32..6), 0..40),
        ) {
            let facts: Vec<_> = rows
                .into_iter()
                .map(|(g, credits)| EnrollmentFact { grade: g, status: "completed".into(), credits, course_code: "X".into() })
                .collect();
            match weighted_gpa(&facts) {
                Gpa::Value(v) => prop_assert!((0.0..=4.0).contains(&v)),
                Gpa::NoData => prop_assert!(facts.iter().all(|f| f.recognized_grade().is_none())),
            }
        }
    }
}
