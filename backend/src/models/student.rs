use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{FieldCheck, InvalidFields};
use crate::api::{StudentId, TenantId};

/// A stored student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(skip_serializing)]
    pub owner_id: TenantId,
    pub name: String,
    pub email: String,
    /// Course-of-study label (the program the student belongs to).
    pub course: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or updating a student. Every field is optional
/// so the same shape serves both operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub course: String,
}

/// Validated update payload; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
}

impl StudentDraft {
    pub fn into_new(self) -> Result<NewStudent, InvalidFields> {
        let mut check = FieldCheck::new();
        let name = check.required_text("name", self.name);
        let email = check.required_text("email", self.email);
        let course = check.required_text("course", self.course);
        check.finish()?;
        Ok(NewStudent {
            name,
            email,
            course,
        })
    }

    pub fn into_changes(self) -> Result<StudentChanges, InvalidFields> {
        let mut check = FieldCheck::new();
        let changes = StudentChanges {
            name: check.supplied_text("name", self.name),
            email: check.supplied_text("email", self.email),
            course: check.supplied_text("course", self.course),
        };
        check.finish()?;
        Ok(changes)
    }
}

impl StudentChanges {
    pub fn apply(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(course) = &self.course {
            student.course = course.clone();
        }
    }
}
