//! Public API surface for the enrollment tracker.
//!
//! This file consolidates the identifier types and the DTOs returned by the
//! HTTP API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    Course, CourseDraft, Enrollment, EnrollmentDetail, EnrollmentDraft, EnrollmentStatus, Grade,
    Student, StudentDraft,
};
pub use crate::routes::auth::{AuthRequest, AuthSession, AuthUser};
pub use crate::routes::dashboard::{
    CoursePopularity, DashboardData, Gpa, RecentActivity, StatusCounts,
};
pub use crate::routes::listing::{DistinctValues, Page, PageInfo};
pub use crate::routes::seed::{ClearSummary, SeedSummary};
pub use crate::routes::stats::LegacyStats;

crate::define_id_type!(i64, StudentId);
crate::define_id_type!(i64, CourseId);
crate::define_id_type!(i64, EnrollmentId);
crate::define_id_type!(uuid::Uuid, TenantId);

impl TenantId {
    /// Fresh random tenant identifier.
    pub fn generate() -> Self {
        TenantId(uuid::Uuid::new_v4())
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
