//! CSV rendering for the export endpoints.
//!
//! Text cells are wrapped in double quotes exactly as stored: embedded quotes
//! are not doubled, so a value containing `"` yields malformed CSV.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{EnrollmentDetail, Student};

pub const STUDENTS_HEADER: &str = "ID,Name,Email,Course,Created At";
pub const ENROLLMENTS_HEADER: &str =
    "ID,Student,Email,Course Code,Course Name,Credits,Semester,Status,Grade,Enrolled At";

/// One CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(Cow<'a, str>),
    Number(i64),
}

impl<'a> Cell<'a> {
    fn text(value: &'a str) -> Self {
        Cell::Text(Cow::Borrowed(value))
    }

    fn timestamp(value: &DateTime<Utc>) -> Self {
        Cell::Text(Cow::Owned(value.to_rfc3339_opts(SecondsFormat::Secs, true)))
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Cell::Text(text) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
            Cell::Number(n) => out.push_str(&n.to_string()),
        }
    }
}

/// A row type with a fixed export layout.
pub trait CsvRecord {
    const HEADER: &'static str;

    fn cells(&self) -> Vec<Cell<'_>>;
}

impl CsvRecord for Student {
    const HEADER: &'static str = STUDENTS_HEADER;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Number(self.id.value()),
            Cell::text(&self.name),
            Cell::text(&self.email),
            Cell::text(&self.course),
            Cell::timestamp(&self.created_at),
        ]
    }
}

impl CsvRecord for EnrollmentDetail {
    const HEADER: &'static str = ENROLLMENTS_HEADER;

    fn cells(&self) -> Vec<Cell<'_>> {
        vec![
            Cell::Number(self.id.value()),
            Cell::text(&self.student_name),
            Cell::text(&self.student_email),
            Cell::text(&self.course_code),
            Cell::text(&self.course_name),
            Cell::Number(i64::from(self.credits)),
            Cell::text(&self.semester),
            Cell::text(self.status.as_str()),
            Cell::text(self.grade.map(|g| g.as_str()).unwrap_or("")),
            Cell::timestamp(&self.enrolled_at),
        ]
    }
}

/// Header line followed by one line per record, no trailing newline.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    let mut out = String::from(R::HEADER);
    for record in records {
        out.push('\n');
        for (i, cell) in record.cells().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            cell.write_to(&mut out);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::api::{CourseId, EnrollmentId, StudentId, TenantId};
    use crate::models::{EnrollmentStatus, Grade};

    fn student(id: i64, name: &str) -> Student {
        Student {
            id: StudentId(id),
            owner_id: TenantId::generate(),
            name: name.to_string(),
            email: "a@b.com".to_string(),
            course: "Physics".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(to_csv::<Student>(&[]), STUDENTS_HEADER);
        assert_eq!(to_csv::<EnrollmentDetail>(&[]), ENROLLMENTS_HEADER);
    }

    #[test]
    fn test_student_rows() {
        let csv = to_csv(&[student(1, "Ada"), student(2, "Alan")]);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,\"Ada\",\"a@b.com\",\"Physics\",\"2024-01-02T03:04:05Z\""
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_commas_are_not_escaped() {
        let csv = to_csv(&[student(7, "A, B")]);
        assert!(csv.contains("\"A, B\""));
    }

    #[test]
    fn test_enrollment_row_leaves_numbers_bare_and_blank_grade() {
        let row = EnrollmentDetail {
            id: EnrollmentId(4),
            student_id: StudentId(1),
            course_id: CourseId(2),
            semester: "Fall 2024".to_string(),
            status: EnrollmentStatus::Enrolled,
            grade: None,
            enrolled_at: Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
            student_name: "Ada".to_string(),
            student_email: "ada@uni.edu".to_string(),
            course_code: "CS101".to_string(),
            course_name: "Intro".to_string(),
            credits: 3,
        };
        let csv = to_csv(std::slice::from_ref(&row));
        assert!(csv.ends_with(
            "4,\"Ada\",\"ada@uni.edu\",\"CS101\",\"Intro\",3,\"Fall 2024\",\"enrolled\",\"\",\"2024-09-01T00:00:00Z\""
        ));

        let graded = EnrollmentDetail {
            grade: Some(Grade::APlus),
            ..row
        };
        assert!(to_csv(&[graded]).contains(",\"A+\","));
    }
}
