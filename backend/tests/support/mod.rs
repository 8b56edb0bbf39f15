#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use enrollment_tracker::api::{Course, Student, TenantId};
use enrollment_tracker::db::services;
use enrollment_tracker::db::FullRepository;
use enrollment_tracker::models::{CourseDraft, EnrollmentDraft, StudentDraft};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// ==================== Fixtures ====================

pub fn student_draft(name: &str) -> StudentDraft {
    StudentDraft {
        name: Some(name.to_string()),
        email: Some(format!("{}@uni.edu", name.to_lowercase().replace(' ', "."))),
        course: Some("Computer Science".to_string()),
    }
}

pub fn course_draft(code: &str, department: Option<&str>) -> CourseDraft {
    CourseDraft {
        code: Some(code.to_string()),
        name: Some(format!("{} lecture", code)),
        credits: Some(3),
        department: department.map(str::to_string),
    }
}

pub fn enrollment_draft(student: &Student, course: &Course, semester: &str) -> EnrollmentDraft {
    EnrollmentDraft {
        student_id: Some(student.id.value()),
        course_id: Some(course.id.value()),
        semester: Some(semester.to_string()),
        ..Default::default()
    }
}

pub async fn add_student<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    name: &str,
) -> Student {
    services::create_student(repo, tenant, student_draft(name))
        .await
        .expect("student fixture")
}

pub async fn add_course<R: FullRepository + ?Sized>(
    repo: &R,
    tenant: TenantId,
    code: &str,
) -> Course {
    services::create_course(repo, tenant, course_draft(code, Some("Computer Science")))
        .await
        .expect("course fixture")
}
