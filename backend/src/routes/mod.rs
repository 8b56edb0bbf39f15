pub mod auth;
pub mod dashboard;
pub mod export;
pub mod listing;
pub mod seed;
pub mod stats;

/// Health check route, outside the `/api` tree.
pub const HEALTH: &str = "/health";

#[cfg(test)]
mod tests {
    #[test]
    fn test_route_paths() {
        assert_eq!(super::HEALTH, "/health");
        assert_eq!(super::auth::SIGN_IN, "/api/auth/signin");
        assert_eq!(super::listing::STUDENT, "/api/students/{id}");
        assert_eq!(super::dashboard::DASHBOARD, "/api/dashboard");
        assert_eq!(super::stats::STATS, "/api/stats");
        assert_eq!(super::export::EXPORT_ENROLLMENTS, "/api/export/enrollments");
        assert_eq!(super::seed::SEED, "/api/seed");
    }

    #[test]
    fn test_route_paths_live_under_api() {
        for path in [
            super::listing::STUDENTS,
            super::listing::COURSES,
            super::listing::ENROLLMENTS,
            super::listing::DEPARTMENTS,
            super::listing::SEMESTERS,
            super::auth::SIGN_UP,
            super::auth::SIGN_OUT,
            super::export::EXPORT_STUDENTS,
        ] {
            assert!(path.starts_with("/api/"), "{path}");
        }
    }
}
