use serde::{Deserialize, Serialize};

// =========================================================
// Demo data routes
// =========================================================

/// Rows inserted by a seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

/// Rows removed by a clear run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSummary {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

/// Seeding refuses to run once a tenant holds more students than this.
pub const SEED_STUDENT_LIMIT: usize = 10;

pub const SEED: &str = "/api/seed";
