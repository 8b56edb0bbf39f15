use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

// =========================================================
// Dashboard types + route
// =========================================================

/// Credit-weighted grade point average.
///
/// `NoData` means nothing graded yet, which is not the same as a 0.00 GPA.
/// Serialized as a two-decimal string (`"3.25"`) or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gpa {
    Value(f64),
    NoData,
}

pub const GPA_NO_DATA: &str = "N/A";

impl Gpa {
    pub fn value(&self) -> Option<f64> {
        match self {
            Gpa::Value(v) => Some(*v),
            Gpa::NoData => None,
        }
    }
}

impl std::fmt::Display for Gpa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gpa::Value(v) => write!(f, "{:.2}", v),
            Gpa::NoData => f.write_str(GPA_NO_DATA),
        }
    }
}

impl Serialize for Gpa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Gpa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == GPA_NO_DATA {
            return Ok(Gpa::NoData);
        }
        raw.parse::<f64>()
            .map(Gpa::Value)
            .map_err(serde::de::Error::custom)
    }
}

/// Enrollment count for one course code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePopularity {
    pub course: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub enrolled: usize,
    pub completed: usize,
    pub dropped: usize,
}

/// One line of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub student: String,
    /// `"<code> — <name>"`
    pub course: String,
    /// Letter grade or `"Pending"`.
    pub grade: String,
    pub semester: String,
    /// `YYYY-MM-DD` of the enrollment timestamp.
    pub date: String,
}

/// Complete dashboard bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_enrollments: usize,
    pub gpa: Gpa,
    pub grade_distribution: BTreeMap<String, usize>,
    pub course_popularity: Vec<CoursePopularity>,
    pub department_counts: BTreeMap<String, usize>,
    pub status_counts: StatusCounts,
    pub recent_activity: Vec<RecentActivity>,
}

/// Route path for the dashboard bundle
pub const DASHBOARD: &str = "/api/dashboard";
