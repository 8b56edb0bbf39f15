use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{courses, enrollments, students};
use crate::api::{CourseId, EnrollmentId, StudentId, TenantId};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{
    Course, CourseChanges, Enrollment, EnrollmentChanges, EnrollmentDetail, GradeUpdate,
    NewCourse, NewEnrollment, NewStudent, Student, StudentChanges,
};

// ==================== Students ====================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub email: String,
    pub course: String,
    pub created_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: StudentId(row.id),
            owner_id: TenantId(row.owner_id),
            name: row.name,
            email: row.email,
            course: row.course,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow {
    pub owner_id: Uuid,
    pub name: String,
    pub email: String,
    pub course: String,
}

impl NewStudentRow {
    pub fn new(tenant: TenantId, student: &NewStudent) -> Self {
        Self {
            owner_id: tenant.0,
            name: student.name.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
        }
    }
}

/// `None` fields are left out of the `SET` list.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub struct StudentChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
}

impl StudentChangeset {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.course.is_none()
    }
}

impl From<&StudentChanges> for StudentChangeset {
    fn from(changes: &StudentChanges) -> Self {
        Self {
            name: changes.name.clone(),
            email: changes.email.clone(),
            course: changes.course.clone(),
        }
    }
}

// ==================== Courses ====================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: CourseId(row.id),
            owner_id: TenantId(row.owner_id),
            code: row.code,
            name: row.name,
            credits: row.credits,
            department: row.department,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub struct NewCourseRow {
    pub owner_id: Uuid,
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub department: Option<String>,
}

impl NewCourseRow {
    pub fn new(tenant: TenantId, course: &NewCourse) -> Self {
        Self {
            owner_id: tenant.0,
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            department: course.department.clone(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
pub struct CourseChangeset {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub department: Option<String>,
}

impl CourseChangeset {
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.credits.is_none()
            && self.department.is_none()
    }
}

impl From<&CourseChanges> for CourseChangeset {
    fn from(changes: &CourseChanges) -> Self {
        Self {
            code: changes.code.clone(),
            name: changes.name.clone(),
            credits: changes.credits,
            department: changes.department.clone(),
        }
    }
}

// ==================== Enrollments ====================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EnrollmentRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub student_id: i64,
    pub course_id: i64,
    pub semester: String,
    pub status: String,
    pub grade: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

fn stored_value_error(id: i64, err: impl ToString) -> RepositoryError {
    RepositoryError::internal_with_context(
        err.to_string(),
        ErrorContext::new("decode_enrollment")
            .with_entity("enrollment")
            .with_entity_id(id),
    )
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = RepositoryError;

    fn try_from(row: EnrollmentRow) -> RepositoryResult<Self> {
        let status = row
            .status
            .parse()
            .map_err(|e| stored_value_error(row.id, e))?;
        let grade = row
            .grade
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| stored_value_error(row.id, e))?;

        Ok(Enrollment {
            id: EnrollmentId(row.id),
            owner_id: TenantId(row.owner_id),
            student_id: StudentId(row.student_id),
            course_id: CourseId(row.course_id),
            semester: row.semester,
            status,
            grade,
            enrolled_at: row.enrolled_at,
        })
    }
}

/// Enrollment joined with student name/email and course code/name/credits.
pub type DetailTuple = (EnrollmentRow, String, String, String, String, i32);

pub fn detail_from_tuple(tuple: DetailTuple) -> RepositoryResult<EnrollmentDetail> {
    let (row, student_name, student_email, course_code, course_name, credits) = tuple;
    let enrollment = Enrollment::try_from(row)?;
    Ok(EnrollmentDetail {
        id: enrollment.id,
        student_id: enrollment.student_id,
        course_id: enrollment.course_id,
        semester: enrollment.semester,
        status: enrollment.status,
        grade: enrollment.grade,
        enrolled_at: enrollment.enrolled_at,
        student_name,
        student_email,
        course_code,
        course_name,
        credits,
    })
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub struct NewEnrollmentRow {
    pub owner_id: Uuid,
    pub student_id: i64,
    pub course_id: i64,
    pub semester: String,
    pub status: String,
    pub grade: Option<String>,
}

impl NewEnrollmentRow {
    pub fn new(tenant: TenantId, enrollment: &NewEnrollment) -> Self {
        Self {
            owner_id: tenant.0,
            student_id: enrollment.student_id.0,
            course_id: enrollment.course_id.0,
            semester: enrollment.semester.clone(),
            status: enrollment.status.as_str().to_string(),
            grade: enrollment.grade.map(|g| g.as_str().to_string()),
        }
    }
}

/// `grade: Some(None)` writes `NULL`; `None` leaves the column alone.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = enrollments)]
pub struct EnrollmentChangeset {
    pub semester: Option<String>,
    pub status: Option<String>,
    pub grade: Option<Option<String>>,
}

impl EnrollmentChangeset {
    pub fn is_empty(&self) -> bool {
        self.semester.is_none() && self.status.is_none() && self.grade.is_none()
    }
}

impl From<&EnrollmentChanges> for EnrollmentChangeset {
    fn from(changes: &EnrollmentChanges) -> Self {
        Self {
            semester: changes.semester.clone(),
            status: changes.status.map(|s| s.as_str().to_string()),
            grade: match changes.grade {
                GradeUpdate::Keep => None,
                GradeUpdate::Clear => Some(None),
                GradeUpdate::Set(grade) => Some(Some(grade.as_str().to_string())),
            },
        }
    }
}
