//! Query shaping for tenant-scoped listings.
//!
//! Turns raw listing parameters (page, free-text search, equality filters,
//! the `all` switch) into typed queries that every repository backend
//! executes the same way. The in-memory backend uses [`StudentQuery::matches`]
//! and friends directly; the Postgres backend translates the same fields into
//! `ILIKE`/`=` predicates.

use crate::api::{Page, PageInfo};
use crate::models::{
    non_blank, Course, EnrollmentDetail, EnrollmentStatus, Grade, InvalidFields, Student,
};

/// Fixed page size for paginated listings.
pub const PAGE_SIZE: u32 = 10;

/// `ceil(total / page_size)`; zero rows means zero pages.
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let size = page_size as usize;
    total.div_ceil(size) as u32
}

/// A 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Page with the default size. Missing or sub-1 pages become page 1.
    pub fn new(page: Option<i64>) -> Self {
        Self::with_size(page, PAGE_SIZE)
    }

    pub fn with_size(page: Option<i64>, page_size: u32) -> Self {
        let page = page.unwrap_or(1).clamp(1, u32::MAX as i64) as u32;
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }

    pub fn info(&self, total: usize) -> PageInfo {
        PageInfo {
            total,
            page: self.page,
            page_size: self.page_size,
            total_pages: total_pages(total, self.page_size),
        }
    }

    /// Cut this page out of an already filtered and ordered row set.
    pub fn paginate<T>(&self, rows: Vec<T>) -> Page<T> {
        let total = rows.len();
        let data = rows
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect();
        Page {
            data,
            info: self.info(total),
        }
    }
}

/// Whether a listing is paginated and filtered, or the unpaged `all` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Paged(PageRequest),
    /// Unfiltered and unpaged, for selection dropdowns.
    All,
}

impl Listing {
    pub fn new(page: Option<i64>, all: bool) -> Self {
        if all {
            Listing::All
        } else {
            Listing::Paged(PageRequest::new(page))
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Listing::All)
    }

    /// Apply the listing to already filtered and ordered rows.
    pub fn apply<T>(&self, rows: Vec<T>) -> Page<T> {
        match self {
            Listing::Paged(request) => request.paginate(rows),
            Listing::All => unpaged(rows),
        }
    }
}

/// A single page holding every row.
pub fn unpaged<T>(rows: Vec<T>) -> Page<T> {
    let total = rows.len();
    Page {
        data: rows,
        info: PageInfo {
            total,
            page: 1,
            page_size: total as u32,
            total_pages: if total == 0 { 0 } else { 1 },
        },
    }
}

/// Case-insensitive substring search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Trimmed term; blank input means no search.
    pub fn parse(term: Option<String>) -> Option<Self> {
        non_blank(term).map(|raw| Self {
            folded: raw.to_lowercase(),
            raw,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }

    /// `%term%` with LIKE metacharacters escaped.
    pub fn like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.raw.len() + 2);
        escaped.push('%');
        for ch in self.raw.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('%');
        escaped
    }
}

fn search_hits(search: &Option<SearchTerm>, fields: &[&str]) -> bool {
    match search {
        Some(term) => fields.iter().any(|field| term.matches(field)),
        None => true,
    }
}

fn equals(filter: &Option<String>, value: &str) -> bool {
    filter.as_deref().map_or(true, |wanted| wanted == value)
}

/// Student listing: search over name/email, exact course-of-study filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentQuery {
    pub search: Option<SearchTerm>,
    pub course: Option<String>,
    pub listing: Listing,
}

impl StudentQuery {
    pub fn new(search: Option<String>, course: Option<String>, page: Option<i64>, all: bool) -> Self {
        let listing = Listing::new(page, all);
        if listing.is_all() {
            return Self::all();
        }
        Self {
            search: SearchTerm::parse(search),
            course: non_blank(course),
            listing,
        }
    }

    pub fn all() -> Self {
        Self {
            search: None,
            course: None,
            listing: Listing::All,
        }
    }

    pub fn page(page: i64) -> Self {
        Self::new(None, None, Some(page), false)
    }

    pub fn matches(&self, student: &Student) -> bool {
        search_hits(&self.search, &[&student.name, &student.email])
            && equals(&self.course, &student.course)
    }
}

/// Course listing: search over code/name, exact department filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseQuery {
    pub search: Option<SearchTerm>,
    pub department: Option<String>,
    pub listing: Listing,
}

impl CourseQuery {
    pub fn new(
        search: Option<String>,
        department: Option<String>,
        page: Option<i64>,
        all: bool,
    ) -> Self {
        let listing = Listing::new(page, all);
        if listing.is_all() {
            return Self::all();
        }
        Self {
            search: SearchTerm::parse(search),
            department: non_blank(department),
            listing,
        }
    }

    pub fn all() -> Self {
        Self {
            search: None,
            department: None,
            listing: Listing::All,
        }
    }

    pub fn page(page: i64) -> Self {
        Self::new(None, None, Some(page), false)
    }

    pub fn matches(&self, course: &Course) -> bool {
        search_hits(&self.search, &[&course.code, &course.name])
            && self
                .department
                .as_deref()
                .map_or(true, |wanted| course.department.as_deref() == Some(wanted))
    }
}

/// Joined enrollment listing: search over student name, course code and
/// course name; independent exact filters on semester, grade and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentQuery {
    pub search: Option<SearchTerm>,
    pub semester: Option<String>,
    pub grade: Option<Grade>,
    pub status: Option<EnrollmentStatus>,
    pub listing: Listing,
}

/// Raw enrollment filter parameters as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilters {
    pub search: Option<String>,
    pub semester: Option<String>,
    pub grade: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub all: bool,
}

impl EnrollmentQuery {
    /// Shape raw parameters. Grade and status must come from their closed
    /// vocabularies; anything else is rejected rather than matched as text.
    pub fn from_filters(filters: EnrollmentFilters) -> Result<Self, InvalidFields> {
        let listing = Listing::new(filters.page, filters.all);
        if listing.is_all() {
            return Ok(Self::all());
        }
        let grade = non_blank(filters.grade)
            .map(|g| g.parse::<Grade>())
            .transpose()
            .map_err(|e| InvalidFields::single("grade", format!("Invalid grade filter: {}", e)))?;
        let status = non_blank(filters.status)
            .map(|s| s.parse::<EnrollmentStatus>())
            .transpose()
            .map_err(|e| {
                InvalidFields::single("status", format!("Invalid status filter: {}", e))
            })?;
        Ok(Self {
            search: SearchTerm::parse(filters.search),
            semester: non_blank(filters.semester),
            grade,
            status,
            listing,
        })
    }

    pub fn all() -> Self {
        Self {
            search: None,
            semester: None,
            grade: None,
            status: None,
            listing: Listing::All,
        }
    }

    pub fn page(page: i64) -> Self {
        Self {
            listing: Listing::Paged(PageRequest::new(Some(page))),
            ..Self::all()
        }
    }

    pub fn matches(&self, row: &EnrollmentDetail) -> bool {
        search_hits(
            &self.search,
            &[&row.student_name, &row.course_code, &row.course_name],
        ) && equals(&self.semester, &row.semester)
            && self.grade.map_or(true, |g| row.grade == Some(g))
            && self.status.map_or(true, |s| row.status == s)
    }
}

/// Column a distinct-value listing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    /// `courses.department`
    Department,
    /// `enrollments.semester`
    Semester,
}

/// Sort ascending and drop duplicates and blanks.
pub fn distinct_sorted<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let set: std::collections::BTreeSet<String> = values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod query_tests;
