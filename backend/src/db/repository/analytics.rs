//! Aggregate reads and tenant-wide maintenance.
//!
//! These feed the dashboard and legacy statistics. They return raw facts; the
//! arithmetic lives in [`crate::services::aggregator`], which stays pure.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{ClearSummary, TenantId};
use crate::db::query::DistinctField;
use crate::models::EnrollmentDetail;
use crate::services::aggregator::EnrollmentFact;

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// One fact per enrollment: grade and status as stored, course credits
    /// and code.
    async fn enrollment_facts(&self, tenant: TenantId) -> RepositoryResult<Vec<EnrollmentFact>>;

    /// Department label of every course, `None` where unset.
    async fn course_departments(&self, tenant: TenantId) -> RepositoryResult<Vec<Option<String>>>;

    /// Most recent enrollments, newest first, at most `limit`.
    async fn recent_enrollments(
        &self,
        tenant: TenantId,
        limit: usize,
    ) -> RepositoryResult<Vec<EnrollmentDetail>>;

    /// Sorted, de-duplicated non-blank values of one column.
    async fn distinct_values(
        &self,
        tenant: TenantId,
        field: DistinctField,
    ) -> RepositoryResult<Vec<String>>;

    /// Delete every enrollment, student and course owned by `tenant`.
    async fn clear_tenant(&self, tenant: TenantId) -> RepositoryResult<ClearSummary>;
}
