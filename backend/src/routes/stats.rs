use serde::{Deserialize, Serialize};

use super::dashboard::Gpa;

// =========================================================
// Legacy statistics route
// =========================================================

/// Pre-dashboard statistics shape, kept for older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyStats {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_enrollments: usize,
    pub active_enrollments: usize,
    pub average_gpa: Gpa,
}

pub const STATS: &str = "/api/stats";
