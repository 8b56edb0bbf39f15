//! In-memory local repository implementation.
//!
//! Implements every repository trait over in-process maps. It enforces the
//! same rules the Postgres schema does: rows are only visible to their owning
//! tenant, the (student, course, semester) triple is unique per tenant, and
//! deleting a student or course removes its enrollments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{ClearSummary, CourseId, EnrollmentId, Page, StudentId, TenantId};
use crate::db::query::{distinct_sorted, CourseQuery, DistinctField, EnrollmentQuery, StudentQuery};
use crate::db::repository::*;
use crate::models::{
    Course, CourseChanges, Enrollment, EnrollmentChanges, EnrollmentDetail, NewCourse,
    NewEnrollment, NewStudent, Student, StudentChanges,
};
use crate::services::aggregator::EnrollmentFact;

/// In-memory local repository.
///
/// Cloning shares the underlying store, so one instance can back the whole
/// server and every test handle sees the same rows.
///
/// # Example
/// ```
/// use enrollment_tracker::api::TenantId;
/// use enrollment_tracker::db::repositories::LocalRepository;
/// use enrollment_tracker::db::repository::StudentRepository;
/// use enrollment_tracker::models::NewStudent;
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new();
/// let tenant = TenantId::generate();
/// let student = NewStudent {
///     name: "Ada".into(),
///     email: "ada@uni.edu".into(),
///     course: "Mathematics".into(),
/// };
/// repo.create_student(tenant, &student).await.unwrap();
/// assert_eq!(repo.count_students(tenant).await.unwrap(), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    students: BTreeMap<StudentId, Student>,
    courses: BTreeMap<CourseId, Course>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,

    // ID counters, shared across tenants like database sequences
    next_student_id: i64,
    next_course_id: i64,
    next_enrollment_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            students: BTreeMap::new(),
            courses: BTreeMap::new(),
            enrollments: BTreeMap::new(),
            next_student_id: 1,
            next_course_id: 1,
            next_enrollment_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn student(&self, tenant: TenantId, id: StudentId) -> Option<&Student> {
        self.students.get(&id).filter(|s| s.owner_id == tenant)
    }

    fn course(&self, tenant: TenantId, id: CourseId) -> Option<&Course> {
        self.courses.get(&id).filter(|c| c.owner_id == tenant)
    }

    fn enrollment(&self, tenant: TenantId, id: EnrollmentId) -> Option<&Enrollment> {
        self.enrollments.get(&id).filter(|e| e.owner_id == tenant)
    }

    fn slot_taken(
        &self,
        tenant: TenantId,
        student_id: StudentId,
        course_id: CourseId,
        semester: &str,
        except: Option<EnrollmentId>,
    ) -> bool {
        self.enrollments.values().any(|e| {
            e.owner_id == tenant
                && Some(e.id) != except
                && e.same_slot(student_id, course_id, semester)
        })
    }

    /// Inner join of the tenant's enrollments with their student and course.
    fn details(&self, tenant: TenantId) -> Vec<EnrollmentDetail> {
        self.enrollments
            .values()
            .filter(|e| e.owner_id == tenant)
            .filter_map(|e| {
                let student = self.student(tenant, e.student_id)?;
                let course = self.course(tenant, e.course_id)?;
                Some(EnrollmentDetail {
                    id: e.id,
                    student_id: e.student_id,
                    course_id: e.course_id,
                    semester: e.semester.clone(),
                    status: e.status,
                    grade: e.grade,
                    enrolled_at: e.enrolled_at,
                    student_name: student.name.clone(),
                    student_email: student.email.clone(),
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    credits: course.credits,
                })
            })
            .collect()
    }
}

/// Newest first; ids break timestamp ties so insertion order is stable.
fn newest_first<K: Ord>(a: (DateTime<Utc>, K), b: (DateTime<Utc>, K)) -> std::cmp::Ordering {
    b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Check if the repository is marked healthy.
    pub fn check_health(&self) -> bool {
        self.data.read().is_healthy
    }

    /// Simulate the store going away, for health-check tests.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.check_health() {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is unavailable",
                ErrorContext::new(operation),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Student Repository ====================

#[async_trait]
impl StudentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.check_health())
    }

    async fn list_students(
        &self,
        tenant: TenantId,
        query: &StudentQuery,
    ) -> RepositoryResult<Page<Student>> {
        self.ensure_healthy("list_students")?;
        let data = self.data.read();

        let mut rows: Vec<Student> = data
            .students
            .values()
            .filter(|s| s.owner_id == tenant && query.matches(s))
            .cloned()
            .collect();
        if query.listing.is_all() {
            rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        } else {
            rows.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        }
        Ok(query.listing.apply(rows))
    }

    async fn get_student(&self, tenant: TenantId, id: StudentId) -> RepositoryResult<Student> {
        self.ensure_healthy("get_student")?;
        self.data
            .read()
            .student(tenant, id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing("student", id, "get_student"))
    }

    async fn create_student(
        &self,
        tenant: TenantId,
        student: &NewStudent,
    ) -> RepositoryResult<Student> {
        self.ensure_healthy("create_student")?;
        let mut data = self.data.write();
        let id = StudentId(data.next_student_id);
        data.next_student_id += 1;

        let stored = Student {
            id,
            owner_id: tenant,
            name: student.name.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
            created_at: Utc::now(),
        };
        data.students.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_student(
        &self,
        tenant: TenantId,
        id: StudentId,
        changes: &StudentChanges,
    ) -> RepositoryResult<Student> {
        self.ensure_healthy("update_student")?;
        let mut data = self.data.write();
        match data.students.get_mut(&id).filter(|s| s.owner_id == tenant) {
            Some(student) => {
                changes.apply(student);
                Ok(student.clone())
            }
            None => Err(RepositoryError::missing("student", id, "update_student")),
        }
    }

    async fn delete_student(&self, tenant: TenantId, id: StudentId) -> RepositoryResult<()> {
        self.ensure_healthy("delete_student")?;
        let mut data = self.data.write();
        if data.student(tenant, id).is_none() {
            return Err(RepositoryError::missing("student", id, "delete_student"));
        }
        data.students.remove(&id);
        data.enrollments
            .retain(|_, e| !(e.owner_id == tenant && e.student_id == id));
        Ok(())
    }

    async fn count_students(&self, tenant: TenantId) -> RepositoryResult<usize> {
        self.ensure_healthy("count_students")?;
        Ok(self
            .data
            .read()
            .students
            .values()
            .filter(|s| s.owner_id == tenant)
            .count())
    }
}

// ==================== Course Repository ====================

#[async_trait]
impl CourseRepository for LocalRepository {
    async fn list_courses(
        &self,
        tenant: TenantId,
        query: &CourseQuery,
    ) -> RepositoryResult<Page<Course>> {
        self.ensure_healthy("list_courses")?;
        let data = self.data.read();

        let mut rows: Vec<Course> = data
            .courses
            .values()
            .filter(|c| c.owner_id == tenant && query.matches(c))
            .cloned()
            .collect();
        if query.listing.is_all() {
            rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        } else {
            rows.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        }
        Ok(query.listing.apply(rows))
    }

    async fn get_course(&self, tenant: TenantId, id: CourseId) -> RepositoryResult<Course> {
        self.ensure_healthy("get_course")?;
        self.data
            .read()
            .course(tenant, id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing("course", id, "get_course"))
    }

    async fn create_course(
        &self,
        tenant: TenantId,
        course: &NewCourse,
    ) -> RepositoryResult<Course> {
        self.ensure_healthy("create_course")?;
        let mut data = self.data.write();
        let id = CourseId(data.next_course_id);
        data.next_course_id += 1;

        let stored = Course {
            id,
            owner_id: tenant,
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            department: course.department.clone(),
            created_at: Utc::now(),
        };
        data.courses.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_course(
        &self,
        tenant: TenantId,
        id: CourseId,
        changes: &CourseChanges,
    ) -> RepositoryResult<Course> {
        self.ensure_healthy("update_course")?;
        let mut data = self.data.write();
        match data.courses.get_mut(&id).filter(|c| c.owner_id == tenant) {
            Some(course) => {
                changes.apply(course);
                Ok(course.clone())
            }
            None => Err(RepositoryError::missing("course", id, "update_course")),
        }
    }

    async fn delete_course(&self, tenant: TenantId, id: CourseId) -> RepositoryResult<()> {
        self.ensure_healthy("delete_course")?;
        let mut data = self.data.write();
        if data.course(tenant, id).is_none() {
            return Err(RepositoryError::missing("course", id, "delete_course"));
        }
        data.courses.remove(&id);
        data.enrollments
            .retain(|_, e| !(e.owner_id == tenant && e.course_id == id));
        Ok(())
    }

    async fn count_courses(&self, tenant: TenantId) -> RepositoryResult<usize> {
        self.ensure_healthy("count_courses")?;
        Ok(self
            .data
            .read()
            .courses
            .values()
            .filter(|c| c.owner_id == tenant)
            .count())
    }
}

// ==================== Enrollment Repository ====================

#[async_trait]
impl EnrollmentRepository for LocalRepository {
    async fn list_enrollments(
        &self,
        tenant: TenantId,
        query: &EnrollmentQuery,
    ) -> RepositoryResult<Page<EnrollmentDetail>> {
        self.ensure_healthy("list_enrollments")?;
        let mut rows: Vec<EnrollmentDetail> = self
            .data
            .read()
            .details(tenant)
            .into_iter()
            .filter(|row| query.matches(row))
            .collect();
        rows.sort_by(|a, b| newest_first((a.enrolled_at, a.id), (b.enrolled_at, b.id)));
        Ok(query.listing.apply(rows))
    }

    async fn get_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
    ) -> RepositoryResult<Enrollment> {
        self.ensure_healthy("get_enrollment")?;
        self.data
            .read()
            .enrollment(tenant, id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing("enrollment", id, "get_enrollment"))
    }

    async fn create_enrollment(
        &self,
        tenant: TenantId,
        enrollment: &NewEnrollment,
    ) -> RepositoryResult<Enrollment> {
        self.ensure_healthy("create_enrollment")?;
        let mut data = self.data.write();

        // Foreign keys: both sides must exist for this tenant.
        if data.student(tenant, enrollment.student_id).is_none() {
            return Err(RepositoryError::missing(
                "student",
                enrollment.student_id,
                "create_enrollment",
            ));
        }
        if data.course(tenant, enrollment.course_id).is_none() {
            return Err(RepositoryError::missing(
                "course",
                enrollment.course_id,
                "create_enrollment",
            ));
        }
        if data.slot_taken(
            tenant,
            enrollment.student_id,
            enrollment.course_id,
            &enrollment.semester,
            None,
        ) {
            return Err(RepositoryError::duplicate_enrollment("create_enrollment"));
        }

        let id = EnrollmentId(data.next_enrollment_id);
        data.next_enrollment_id += 1;
        let stored = Enrollment {
            id,
            owner_id: tenant,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            semester: enrollment.semester.clone(),
            status: enrollment.status,
            grade: enrollment.grade,
            enrolled_at: Utc::now(),
        };
        data.enrollments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
        changes: &EnrollmentChanges,
    ) -> RepositoryResult<Enrollment> {
        self.ensure_healthy("update_enrollment")?;
        let mut data = self.data.write();

        let mut updated = data
            .enrollment(tenant, id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing("enrollment", id, "update_enrollment"))?;
        changes.apply(&mut updated);

        if data.slot_taken(
            tenant,
            updated.student_id,
            updated.course_id,
            &updated.semester,
            Some(id),
        ) {
            return Err(RepositoryError::duplicate_enrollment("update_enrollment"));
        }

        data.enrollments.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
    ) -> RepositoryResult<()> {
        self.ensure_healthy("delete_enrollment")?;
        let mut data = self.data.write();
        if data.enrollment(tenant, id).is_none() {
            return Err(RepositoryError::missing("enrollment", id, "delete_enrollment"));
        }
        data.enrollments.remove(&id);
        Ok(())
    }

    async fn count_enrollments(&self, tenant: TenantId) -> RepositoryResult<usize> {
        self.ensure_healthy("count_enrollments")?;
        Ok(self
            .data
            .read()
            .enrollments
            .values()
            .filter(|e| e.owner_id == tenant)
            .count())
    }
}

// ==================== Analytics Repository ====================

#[async_trait]
impl AnalyticsRepository for LocalRepository {
    async fn enrollment_facts(&self, tenant: TenantId) -> RepositoryResult<Vec<EnrollmentFact>> {
        self.ensure_healthy("enrollment_facts")?;
        Ok(self
            .data
            .read()
            .details(tenant)
            .iter()
            .map(EnrollmentFact::from)
            .collect())
    }

    async fn course_departments(
        &self,
        tenant: TenantId,
    ) -> RepositoryResult<Vec<Option<String>>> {
        self.ensure_healthy("course_departments")?;
        Ok(self
            .data
            .read()
            .courses
            .values()
            .filter(|c| c.owner_id == tenant)
            .map(|c| c.department.clone())
            .collect())
    }

    async fn recent_enrollments(
        &self,
        tenant: TenantId,
        limit: usize,
    ) -> RepositoryResult<Vec<EnrollmentDetail>> {
        self.ensure_healthy("recent_enrollments")?;
        let mut rows = self.data.read().details(tenant);
        rows.sort_by(|a, b| newest_first((a.enrolled_at, a.id), (b.enrolled_at, b.id)));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn distinct_values(
        &self,
        tenant: TenantId,
        field: DistinctField,
    ) -> RepositoryResult<Vec<String>> {
        self.ensure_healthy("distinct_values")?;
        let data = self.data.read();
        let values: Vec<String> = match field {
            DistinctField::Department => data
                .courses
                .values()
                .filter(|c| c.owner_id == tenant)
                .filter_map(|c| c.department.clone())
                .collect(),
            DistinctField::Semester => data
                .enrollments
                .values()
                .filter(|e| e.owner_id == tenant)
                .map(|e| e.semester.clone())
                .collect(),
        };
        Ok(distinct_sorted(values))
    }

    async fn clear_tenant(&self, tenant: TenantId) -> RepositoryResult<ClearSummary> {
        self.ensure_healthy("clear_tenant")?;
        let mut data = self.data.write();

        let before = (
            data.students.len(),
            data.courses.len(),
            data.enrollments.len(),
        );
        data.enrollments.retain(|_, e| e.owner_id != tenant);
        data.students.retain(|_, s| s.owner_id != tenant);
        data.courses.retain(|_, c| c.owner_id != tenant);

        Ok(ClearSummary {
            students: before.0 - data.students.len(),
            courses: before.1 - data.courses.len(),
            enrollments: before.2 - data.enrollments.len(),
        })
    }
}
