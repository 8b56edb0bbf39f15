use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::grade::{EnrollmentStatus, Grade};
use super::validation::{FieldCheck, InvalidFields};
use crate::api::{CourseId, EnrollmentId, StudentId, TenantId};

/// A stored enrollment linking one student to one course for a semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    #[serde(skip_serializing)]
    pub owner_id: TenantId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester: String,
    pub status: EnrollmentStatus,
    pub grade: Option<Grade>,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    /// Whether this enrollment occupies the given (student, course, semester) slot.
    pub fn same_slot(&self, student_id: StudentId, course_id: CourseId, semester: &str) -> bool {
        self.student_id == student_id && self.course_id == course_id && self.semester == semester
    }
}

/// Enrollment flattened with the joined student and course columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester: String,
    pub status: EnrollmentStatus,
    pub grade: Option<Grade>,
    pub enrolled_at: DateTime<Utc>,
    pub student_name: String,
    pub student_email: String,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
}

/// Request body for creating or updating an enrollment.
///
/// `grade` distinguishes three states: field absent (`None`), explicit
/// `null`/`""` (`Some(None)` after blank filtering), and a letter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentDraft {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub grade: Option<Option<String>>,
}

fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// What an update does to the stored grade.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GradeUpdate {
    #[default]
    Keep,
    Clear,
    Set(Grade),
}

impl GradeUpdate {
    pub fn apply(self, current: Option<Grade>) -> Option<Grade> {
        match self {
            GradeUpdate::Keep => current,
            GradeUpdate::Clear => None,
            GradeUpdate::Set(grade) => Some(grade),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub semester: String,
    pub status: EnrollmentStatus,
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentChanges {
    pub semester: Option<String>,
    pub status: Option<EnrollmentStatus>,
    pub grade: GradeUpdate,
}

fn parse_status(check: &mut FieldCheck, status: Option<String>) -> Option<EnrollmentStatus> {
    let raw = super::validation::non_blank(status)?;
    match raw.parse() {
        Ok(status) => Some(status),
        Err(e) => {
            check.invalid("status", format!("Invalid status: {}", e));
            None
        }
    }
}

fn parse_grade(check: &mut FieldCheck, grade: Option<Option<String>>) -> GradeUpdate {
    match grade {
        None => GradeUpdate::Keep,
        Some(value) => match super::validation::non_blank(value) {
            None => GradeUpdate::Clear,
            Some(raw) => match raw.parse() {
                Ok(grade) => GradeUpdate::Set(grade),
                Err(e) => {
                    check.invalid("grade", format!("Invalid grade: {}", e));
                    GradeUpdate::Keep
                }
            },
        },
    }
}

impl EnrollmentDraft {
    pub fn into_new(self) -> Result<NewEnrollment, InvalidFields> {
        let mut check = FieldCheck::new();
        let student_id = check.required("student_id", self.student_id);
        let course_id = check.required("course_id", self.course_id);
        let semester = check.required_text("semester", self.semester);
        let status = parse_status(&mut check, self.status);
        let grade = parse_grade(&mut check, self.grade);
        check.finish()?;
        Ok(NewEnrollment {
            student_id: StudentId(student_id.unwrap_or_default()),
            course_id: CourseId(course_id.unwrap_or_default()),
            semester,
            status: status.unwrap_or_default(),
            grade: grade.apply(None),
        })
    }

    /// Student and course references are fixed once enrolled; only
    /// semester, status and grade can change.
    pub fn into_changes(self) -> Result<EnrollmentChanges, InvalidFields> {
        let mut check = FieldCheck::new();
        let changes = EnrollmentChanges {
            semester: check.supplied_text("semester", self.semester),
            status: parse_status(&mut check, self.status),
            grade: parse_grade(&mut check, self.grade),
        };
        check.finish()?;
        Ok(changes)
    }
}

impl EnrollmentChanges {
    pub fn apply(&self, enrollment: &mut Enrollment) {
        if let Some(semester) = &self.semester {
            enrollment.semester = semester.clone();
        }
        if let Some(status) = self.status {
            enrollment.status = status;
        }
        enrollment.grade = self.grade.apply(enrollment.grade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(json: &str) -> EnrollmentDraft {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_grade_field_states() {
        assert_eq!(draft("{}").grade, None);
        assert_eq!(draft(r#"{"grade": null}"#).grade, Some(None));
        assert_eq!(
            draft(r#"{"grade": ""}"#).grade,
            Some(Some(String::new()))
        );
        assert_eq!(
            draft(r#"{"grade": "B+"}"#).grade,
            Some(Some("B+".to_string()))
        );
    }

    #[test]
    fn test_changes_grade_update() {
        assert_eq!(draft("{}").into_changes().unwrap().grade, GradeUpdate::Keep);
        assert_eq!(
            draft(r#"{"grade": ""}"#).into_changes().unwrap().grade,
            GradeUpdate::Clear
        );
        assert_eq!(
            draft(r#"{"grade": null}"#).into_changes().unwrap().grade,
            GradeUpdate::Clear
        );
        assert_eq!(
            draft(r#"{"grade": "A-"}"#).into_changes().unwrap().grade,
            GradeUpdate::Set(Grade::AMinus)
        );
    }

    #[test]
    fn test_new_enrollment_defaults_to_enrolled_without_grade() {
        let new = draft(r#"{"student_id": 1, "course_id": 2, "semester": "Fall 2024"}"#)
            .into_new()
            .unwrap();
        assert_eq!(new.status, EnrollmentStatus::Enrolled);
        assert_eq!(new.grade, None);
        assert_eq!(new.semester, "Fall 2024");
    }

    #[test]
    fn test_new_enrollment_reports_missing_and_invalid() {
        let err = draft(r#"{"course_id": 2, "status": "paused"}"#)
            .into_new()
            .unwrap_err();
        assert_eq!(err.fields, vec!["student_id", "semester", "status"]);
        assert!(err.message.starts_with("Missing required fields"));

        let err = draft(r#"{"student_id": 1, "course_id": 2, "semester": "S", "grade": "Z"}"#)
            .into_new()
            .unwrap_err();
        assert_eq!(err.fields, vec!["grade"]);
    }
}
