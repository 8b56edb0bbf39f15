use serde::{Deserialize, Serialize};

// =========================================================
// Listing types + routes
// =========================================================

/// Pagination metadata attached to every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Exact count of rows matching the filters, across all pages.
    pub total: usize,
    /// 1-indexed page that was served.
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// One page of rows plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

/// Sorted distinct values for a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistinctValues {
    pub values: Vec<String>,
}

pub const STUDENTS: &str = "/api/students";
pub const STUDENT: &str = "/api/students/{id}";
pub const COURSES: &str = "/api/courses";
pub const COURSE: &str = "/api/courses/{id}";
pub const ENROLLMENTS: &str = "/api/enrollments";
pub const ENROLLMENT: &str = "/api/enrollments/{id}";
pub const DEPARTMENTS: &str = "/api/departments";
pub const SEMESTERS: &str = "/api/semesters";
