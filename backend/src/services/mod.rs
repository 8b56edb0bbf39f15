//! Service layer for reporting and orchestration.
//!
//! Sits between the repository traits and the HTTP handlers. The aggregator
//! and CSV formatter are pure; the dashboard and seed services orchestrate
//! repository calls around them.

pub mod aggregator;
pub mod csv_export;
pub mod dashboard;
pub mod seed;

pub use aggregator::{weighted_gpa, EnrollmentFact, RECENT_ACTIVITY_LIMIT};
pub use csv_export::{to_csv, CsvRecord};
pub use dashboard::{build_dashboard, legacy_stats};
pub use seed::{clear_tenant_data, seed_demo_data};
