use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{non_blank, FieldCheck, InvalidFields};
use crate::api::{CourseId, TenantId};

/// A stored course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(skip_serializing)]
    pub owner_id: TenantId,
    pub code: String,
    pub name: String,
    /// Credit hours, always positive.
    pub credits: i32,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseDraft {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub credits: Option<i32>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub department: Option<String>,
}

fn check_credits(check: &mut FieldCheck, credits: Option<i32>) -> Option<i32> {
    match credits {
        Some(c) if c <= 0 => {
            check.invalid("credits", "credits must be a positive integer");
            None
        }
        other => other,
    }
}

impl CourseDraft {
    pub fn into_new(self) -> Result<NewCourse, InvalidFields> {
        let mut check = FieldCheck::new();
        let code = check.required_text("code", self.code);
        let name = check.required_text("name", self.name);
        let credits = check.required("credits", self.credits);
        let credits = check_credits(&mut check, credits);
        check.finish()?;
        Ok(NewCourse {
            code,
            name,
            credits: credits.unwrap_or_default(),
            department: non_blank(self.department),
        })
    }

    pub fn into_changes(self) -> Result<CourseChanges, InvalidFields> {
        let mut check = FieldCheck::new();
        let changes = CourseChanges {
            code: check.supplied_text("code", self.code),
            name: check.supplied_text("name", self.name),
            credits: check_credits(&mut check, self.credits),
            department: non_blank(self.department),
        };
        check.finish()?;
        Ok(changes)
    }
}

impl CourseChanges {
    pub fn apply(&self, course: &mut Course) {
        if let Some(code) = &self.code {
            course.code = code.clone();
        }
        if let Some(name) = &self.name {
            course.name = name.clone();
        }
        if let Some(credits) = self.credits {
            course.credits = credits;
        }
        if let Some(department) = &self.department {
            course.department = Some(department.clone());
        }
    }
}
