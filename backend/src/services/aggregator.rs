//! Dashboard arithmetic over raw enrollment facts.
//!
//! Everything here is pure: no store access and no logging. Grades and
//! statuses arrive as stored text so rows written by older clients with
//! values outside the closed vocabularies are skipped instead of failing the
//! whole dashboard.

use std::collections::BTreeMap;

use crate::api::{CoursePopularity, Gpa, RecentActivity, StatusCounts};
use crate::models::{EnrollmentDetail, EnrollmentStatus, Grade};

/// Recent-activity feed length.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Label shown for an enrollment without a grade.
pub const PENDING_GRADE: &str = "Pending";

/// The per-enrollment columns the aggregates read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentFact {
    pub grade: Option<String>,
    pub status: String,
    pub credits: i32,
    pub course_code: String,
}

impl EnrollmentFact {
    pub fn new(
        grade: Option<impl Into<String>>,
        status: impl Into<String>,
        credits: i32,
        course_code: impl Into<String>,
    ) -> Self {
        Self {
            grade: grade.map(Into::into),
            status: status.into(),
            credits,
            course_code: course_code.into(),
        }
    }

    /// The grade when present and on the scale.
    pub fn recognized_grade(&self) -> Option<Grade> {
        self.grade.as_deref().and_then(|g| g.parse().ok())
    }
}

impl From<&EnrollmentDetail> for EnrollmentFact {
    fn from(row: &EnrollmentDetail) -> Self {
        Self {
            grade: row.grade.map(|g| g.as_str().to_string()),
            status: row.status.as_str().to_string(),
            credits: row.credits,
            course_code: row.course_code.clone(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted GPA over graded enrollments, rounded to two decimals.
///
/// Every graded enrollment counts, so retaking a course adds its credits
/// again. No graded credits yields [`Gpa::NoData`].
pub fn weighted_gpa(facts: &[EnrollmentFact]) -> Gpa {
    let mut total_credits: i64 = 0;
    let mut total_points = 0.0;

    for fact in facts {
        if let Some(grade) = fact.recognized_grade() {
            total_credits += i64::from(fact.credits);
            total_points += grade.points() * f64::from(fact.credits);
        }
    }

    if total_credits == 0 {
        Gpa::NoData
    } else {
        Gpa::Value(round2(total_points / total_credits as f64))
    }
}

/// Count per recognized grade letter.
pub fn grade_distribution(facts: &[EnrollmentFact]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for grade in facts.iter().filter_map(EnrollmentFact::recognized_grade) {
        *counts.entry(grade.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Enrollment count per course code, most popular first, ties by code.
pub fn course_popularity(facts: &[EnrollmentFact]) -> Vec<CoursePopularity> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for fact in facts {
        *counts.entry(fact.course_code.as_str()).or_insert(0) += 1;
    }

    let mut popularity: Vec<CoursePopularity> = counts
        .into_iter()
        .map(|(course, count)| CoursePopularity {
            course: course.to_string(),
            count,
        })
        .collect();
    popularity.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.course.cmp(&b.course)));
    popularity
}

/// Course count per department label. Unlabelled courses are not counted.
pub fn department_counts<'a, I>(departments: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts = BTreeMap::new();
    for department in departments.into_iter().flatten() {
        if department.trim().is_empty() {
            continue;
        }
        *counts.entry(department.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Count per status; unrecognized status text is ignored.
pub fn status_counts(facts: &[EnrollmentFact]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for fact in facts {
        match fact.status.parse::<EnrollmentStatus>() {
            Ok(EnrollmentStatus::Enrolled) => counts.enrolled += 1,
            Ok(EnrollmentStatus::Completed) => counts.completed += 1,
            Ok(EnrollmentStatus::Dropped) => counts.dropped += 1,
            Err(_) => {}
        }
    }
    counts
}

/// Project already time-descending enrollments into the activity feed.
pub fn recent_activity(rows: &[EnrollmentDetail]) -> Vec<RecentActivity> {
    rows.iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|row| RecentActivity {
            student: row.student_name.clone(),
            course: format!("{} — {}", row.course_code, row.course_name),
            grade: row
                .grade
                .map(|g| g.as_str().to_string())
                .unwrap_or_else(|| PENDING_GRADE.to_string()),
            semester: row.semester.clone(),
            date: row.enrolled_at.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod aggregator_tests;
