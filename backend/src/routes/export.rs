// =========================================================
// CSV export routes
// =========================================================

pub const EXPORT_STUDENTS: &str = "/api/export/students";
pub const EXPORT_ENROLLMENTS: &str = "/api/export/enrollments";

pub const STUDENTS_FILENAME: &str = "students.csv";
pub const ENROLLMENTS_FILENAME: &str = "enrollments.csv";
