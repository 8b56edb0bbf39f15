//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies mostly come straight from [`crate::api`]; this module adds
//! the query-string shapes and the few HTTP-only responses.

use serde::{Deserialize, Serialize};

use crate::db::query::{CourseQuery, EnrollmentFilters, EnrollmentQuery, StudentQuery};
use crate::models::InvalidFields;

pub use crate::api::{
    AuthRequest, AuthSession, ClearSummary, Course, CourseDraft, DashboardData, DistinctValues,
    Enrollment, EnrollmentDetail, EnrollmentDraft, LegacyStats, Page, SeedSummary, Student,
    StudentDraft,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `connected`, `disconnected` or `error: ...`
    pub database: String,
}

/// Body returned by deletes and sign-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Lenient page parsing: anything unparseable means the first page.
fn parse_page(page: Option<String>) -> Option<i64> {
    page.and_then(|p| p.trim().parse().ok())
}

fn parse_all(all: Option<String>) -> bool {
    matches!(all.as_deref().map(str::trim), Some("true" | "1"))
}

/// `GET /api/students` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListParams {
    pub search: Option<String>,
    pub course: Option<String>,
    pub page: Option<String>,
    pub all: Option<String>,
}

impl From<StudentListParams> for StudentQuery {
    fn from(params: StudentListParams) -> Self {
        StudentQuery::new(
            params.search,
            params.course,
            parse_page(params.page),
            parse_all(params.all),
        )
    }
}

/// `GET /api/courses` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseListParams {
    pub search: Option<String>,
    pub department: Option<String>,
    pub page: Option<String>,
    pub all: Option<String>,
}

impl From<CourseListParams> for CourseQuery {
    fn from(params: CourseListParams) -> Self {
        CourseQuery::new(
            params.search,
            params.department,
            parse_page(params.page),
            parse_all(params.all),
        )
    }
}

/// `GET /api/enrollments` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentListParams {
    pub search: Option<String>,
    pub semester: Option<String>,
    pub grade: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub all: Option<String>,
}

impl TryFrom<EnrollmentListParams> for EnrollmentQuery {
    type Error = InvalidFields;

    fn try_from(params: EnrollmentListParams) -> Result<Self, InvalidFields> {
        EnrollmentQuery::from_filters(EnrollmentFilters {
            search: params.search,
            semester: params.semester,
            grade: params.grade,
            status: params.status,
            page: parse_page(params.page),
            all: parse_all(params.all),
        })
    }
}
