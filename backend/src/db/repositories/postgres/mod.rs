//! Postgres repository implementation using Diesel.
//!
//! Every tenant-scoped operation runs inside a transaction that first sets
//! the transaction-local `app.tenant_id` setting. The row-level security
//! policies created by the embedded migrations restrict all three tables to
//! that tenant; queries also filter on `owner_id` explicitly so plans can use
//! the owner indexes.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Optional retry for transient failures (off by default)
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Retry attempts for transient failures (default: 0)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::api::{ClearSummary, CourseId, EnrollmentId, Page, StudentId, TenantId};
use crate::db::query::{
    distinct_sorted, unpaged, CourseQuery, DistinctField, EnrollmentQuery, Listing, StudentQuery,
};
use crate::db::repository::{
    AnalyticsRepository, CourseRepository, EnrollmentRepository, ErrorContext, RepositoryError,
    RepositoryResult, StudentRepository,
};
use crate::models::{
    Course, CourseChanges, Enrollment, EnrollmentChanges, EnrollmentDetail, NewCourse,
    NewEnrollment, NewStudent, Student, StudentChanges,
};
use crate::services::aggregator::EnrollmentFact;

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

type DetailSource = diesel::dsl::InnerJoin<
    diesel::dsl::InnerJoin<enrollments::table, students::table>,
    courses::table,
>;
type BoxedDetails = diesel::dsl::IntoBoxed<'static, DetailSource, Pg>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Upper bound on the backoff between retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Double the backoff, saturating at [`MAX_RETRY_DELAY`].
fn next_retry_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY)
}

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Retry attempts for transient failures; 0 surfaces every failure at once
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 0,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run a blocking database operation on the pool, retrying retryable
    /// failures up to `max_retries` times.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut retry_delay = Duration::from_millis(retry_delay_ms).min(MAX_RETRY_DELAY);
            let mut attempt = 0;

            loop {
                let result = pool
                    .get()
                    .map_err(|e| {
                        RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        )
                    })
                    .and_then(|mut conn| f.clone()(&mut conn));

                match result {
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        log::warn!("Retrying database operation after error: {}", e);
                        attempt += 1;
                        std::thread::sleep(retry_delay);
                        retry_delay = next_retry_delay(retry_delay);
                    }
                    other => return other,
                }
            }
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Run `f` in a transaction scoped to `tenant`.
    async fn with_tenant<T, F>(&self, tenant: TenantId, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                sql_query("SELECT set_config('app.tenant_id', $1, true)")
                    .bind::<Text, _>(tenant.to_string())
                    .execute(tx)?;
                f(tx)
            })
        })
        .await
    }
}

fn page_of<T>(listing: &Listing, rows: Vec<T>, total: i64) -> Page<T> {
    match listing {
        Listing::Paged(request) => Page {
            data: rows,
            info: request.info(total.max(0) as usize),
        },
        Listing::All => unpaged(rows),
    }
}

fn student_filter(tenant: TenantId, query: &StudentQuery) -> students::BoxedQuery<'static, Pg> {
    let mut q = students::table
        .filter(students::owner_id.eq(tenant.0))
        .into_boxed();
    if let Some(term) = &query.search {
        let pattern = term.like_pattern();
        q = q.filter(
            students::name
                .ilike(pattern.clone())
                .or(students::email.ilike(pattern)),
        );
    }
    if let Some(course) = &query.course {
        q = q.filter(students::course.eq(course.clone()));
    }
    q
}

fn course_filter(tenant: TenantId, query: &CourseQuery) -> courses::BoxedQuery<'static, Pg> {
    let mut q = courses::table
        .filter(courses::owner_id.eq(tenant.0))
        .into_boxed();
    if let Some(term) = &query.search {
        let pattern = term.like_pattern();
        q = q.filter(
            courses::code
                .ilike(pattern.clone())
                .or(courses::name.ilike(pattern)),
        );
    }
    if let Some(department) = &query.department {
        q = q.filter(courses::department.eq(department.clone()));
    }
    q
}

fn detail_filter(tenant: TenantId, query: &EnrollmentQuery) -> BoxedDetails {
    let mut q: BoxedDetails = enrollments::table
        .inner_join(students::table)
        .inner_join(courses::table)
        .into_boxed();
    q = q.filter(enrollments::owner_id.eq(tenant.0));
    if let Some(term) = &query.search {
        let pattern = term.like_pattern();
        q = q.filter(
            students::name
                .ilike(pattern.clone())
                .or(courses::code.ilike(pattern.clone()))
                .or(courses::name.ilike(pattern)),
        );
    }
    if let Some(semester) = &query.semester {
        q = q.filter(enrollments::semester.eq(semester.clone()));
    }
    if let Some(grade) = query.grade {
        q = q.filter(enrollments::grade.eq(grade.as_str()));
    }
    if let Some(status) = query.status {
        q = q.filter(enrollments::status.eq(status.as_str()));
    }
    q
}

fn load_details(
    conn: &mut PgConnection,
    query: BoxedDetails,
) -> RepositoryResult<Vec<EnrollmentDetail>> {
    let rows: Vec<DetailTuple> = query
        .select((
            EnrollmentRow::as_select(),
            students::name,
            students::email,
            courses::code,
            courses::name,
            courses::credits,
        ))
        .load(conn)?;
    rows.into_iter().map(detail_from_tuple).collect()
}

// ==================== Student Repository ====================

#[async_trait]
impl StudentRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn list_students(
        &self,
        tenant: TenantId,
        query: &StudentQuery,
    ) -> RepositoryResult<Page<Student>> {
        let query = query.clone();
        self.with_tenant(tenant, move |conn| {
            let total: i64 = student_filter(tenant, &query).count().get_result(conn)?;
            let rows = student_filter(tenant, &query).select(StudentRow::as_select());
            let rows: Vec<StudentRow> = match query.listing {
                Listing::All => rows
                    .order((students::name.asc(), students::id.asc()))
                    .load(conn)?,
                Listing::Paged(page) => rows
                    .order((students::created_at.desc(), students::id.desc()))
                    .limit(i64::from(page.page_size()))
                    .offset(page.offset() as i64)
                    .load(conn)?,
            };
            Ok(page_of(
                &query.listing,
                rows.into_iter().map(Student::from).collect(),
                total,
            ))
        })
        .await
    }

    async fn get_student(&self, tenant: TenantId, id: StudentId) -> RepositoryResult<Student> {
        self.with_tenant(tenant, move |conn| {
            students::table
                .filter(students::id.eq(id.0))
                .filter(students::owner_id.eq(tenant.0))
                .select(StudentRow::as_select())
                .first::<StudentRow>(conn)
                .optional()?
                .map(Student::from)
                .ok_or_else(|| RepositoryError::missing("student", id, "get_student"))
        })
        .await
    }

    async fn create_student(
        &self,
        tenant: TenantId,
        student: &NewStudent,
    ) -> RepositoryResult<Student> {
        let row = NewStudentRow::new(tenant, student);
        self.with_tenant(tenant, move |conn| {
            let inserted: StudentRow = diesel::insert_into(students::table)
                .values(&row)
                .returning(StudentRow::as_returning())
                .get_result(conn)?;
            Ok(Student::from(inserted))
        })
        .await
    }

    async fn update_student(
        &self,
        tenant: TenantId,
        id: StudentId,
        changes: &StudentChanges,
    ) -> RepositoryResult<Student> {
        let changes = StudentChangeset::from(changes);
        self.with_tenant(tenant, move |conn| {
            let target = students::table
                .filter(students::id.eq(id.0))
                .filter(students::owner_id.eq(tenant.0));
            let row: Option<StudentRow> = if changes.is_empty() {
                target.select(StudentRow::as_select()).first(conn).optional()?
            } else {
                diesel::update(target)
                    .set(&changes)
                    .returning(StudentRow::as_returning())
                    .get_result(conn)
                    .optional()?
            };
            row.map(Student::from)
                .ok_or_else(|| RepositoryError::missing("student", id, "update_student"))
        })
        .await
    }

    async fn delete_student(&self, tenant: TenantId, id: StudentId) -> RepositoryResult<()> {
        self.with_tenant(tenant, move |conn| {
            let deleted = diesel::delete(
                students::table
                    .filter(students::id.eq(id.0))
                    .filter(students::owner_id.eq(tenant.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("student", id, "delete_student"));
            }
            Ok(())
        })
        .await
    }

    async fn count_students(&self, tenant: TenantId) -> RepositoryResult<usize> {
        self.with_tenant(tenant, move |conn| {
            let total: i64 = students::table
                .filter(students::owner_id.eq(tenant.0))
                .count()
                .get_result(conn)?;
            Ok(total as usize)
        })
        .await
    }
}

// ==================== Course Repository ====================

#[async_trait]
impl CourseRepository for PostgresRepository {
    async fn list_courses(
        &self,
        tenant: TenantId,
        query: &CourseQuery,
    ) -> RepositoryResult<Page<Course>> {
        let query = query.clone();
        self.with_tenant(tenant, move |conn| {
            let total: i64 = course_filter(tenant, &query).count().get_result(conn)?;
            let rows = course_filter(tenant, &query).select(CourseRow::as_select());
            let rows: Vec<CourseRow> = match query.listing {
                Listing::All => rows
                    .order((courses::name.asc(), courses::id.asc()))
                    .load(conn)?,
                Listing::Paged(page) => rows
                    .order((courses::created_at.desc(), courses::id.desc()))
                    .limit(i64::from(page.page_size()))
                    .offset(page.offset() as i64)
                    .load(conn)?,
            };
            Ok(page_of(
                &query.listing,
                rows.into_iter().map(Course::from).collect(),
                total,
            ))
        })
        .await
    }

    async fn get_course(&self, tenant: TenantId, id: CourseId) -> RepositoryResult<Course> {
        self.with_tenant(tenant, move |conn| {
            courses::table
                .filter(courses::id.eq(id.0))
                .filter(courses::owner_id.eq(tenant.0))
                .select(CourseRow::as_select())
                .first::<CourseRow>(conn)
                .optional()?
                .map(Course::from)
                .ok_or_else(|| RepositoryError::missing("course", id, "get_course"))
        })
        .await
    }

    async fn create_course(
        &self,
        tenant: TenantId,
        course: &NewCourse,
    ) -> RepositoryResult<Course> {
        let row = NewCourseRow::new(tenant, course);
        self.with_tenant(tenant, move |conn| {
            let inserted: CourseRow = diesel::insert_into(courses::table)
                .values(&row)
                .returning(CourseRow::as_returning())
                .get_result(conn)?;
            Ok(Course::from(inserted))
        })
        .await
    }

    async fn update_course(
        &self,
        tenant: TenantId,
        id: CourseId,
        changes: &CourseChanges,
    ) -> RepositoryResult<Course> {
        let changes = CourseChangeset::from(changes);
        self.with_tenant(tenant, move |conn| {
            let target = courses::table
                .filter(courses::id.eq(id.0))
                .filter(courses::owner_id.eq(tenant.0));
            let row: Option<CourseRow> = if changes.is_empty() {
                target.select(CourseRow::as_select()).first(conn).optional()?
            } else {
                diesel::update(target)
                    .set(&changes)
                    .returning(CourseRow::as_returning())
                    .get_result(conn)
                    .optional()?
            };
            row.map(Course::from)
                .ok_or_else(|| RepositoryError::missing("course", id, "update_course"))
        })
        .await
    }

    async fn delete_course(&self, tenant: TenantId, id: CourseId) -> RepositoryResult<()> {
        self.with_tenant(tenant, move |conn| {
            let deleted = diesel::delete(
                courses::table
                    .filter(courses::id.eq(id.0))
                    .filter(courses::owner_id.eq(tenant.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("course", id, "delete_course"));
            }
            Ok(())
        })
        .await
    }

    async fn count_courses(&self, tenant: TenantId) -> RepositoryResult<usize> {
        self.with_tenant(tenant, move |conn| {
            let total: i64 = courses::table
                .filter(courses::owner_id.eq(tenant.0))
                .count()
                .get_result(conn)?;
            Ok(total as usize)
        })
        .await
    }
}

// ==================== Enrollment Repository ====================

#[async_trait]
impl EnrollmentRepository for PostgresRepository {
    async fn list_enrollments(
        &self,
        tenant: TenantId,
        query: &EnrollmentQuery,
    ) -> RepositoryResult<Page<EnrollmentDetail>> {
        let query = query.clone();
        self.with_tenant(tenant, move |conn| {
            let total: i64 = detail_filter(tenant, &query).count().get_result(conn)?;
            let ordered = detail_filter(tenant, &query)
                .order((enrollments::enrolled_at.desc(), enrollments::id.desc()));
            let rows = match query.listing {
                Listing::All => load_details(conn, ordered)?,
                Listing::Paged(page) => load_details(
                    conn,
                    ordered
                        .limit(i64::from(page.page_size()))
                        .offset(page.offset() as i64),
                )?,
            };
            Ok(page_of(&query.listing, rows, total))
        })
        .await
    }

    async fn get_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
    ) -> RepositoryResult<Enrollment> {
        self.with_tenant(tenant, move |conn| {
            let row: Option<EnrollmentRow> = enrollments::table
                .filter(enrollments::id.eq(id.0))
                .filter(enrollments::owner_id.eq(tenant.0))
                .select(EnrollmentRow::as_select())
                .first(conn)
                .optional()?;
            row.ok_or_else(|| RepositoryError::missing("enrollment", id, "get_enrollment"))
                .and_then(Enrollment::try_from)
        })
        .await
    }

    async fn create_enrollment(
        &self,
        tenant: TenantId,
        enrollment: &NewEnrollment,
    ) -> RepositoryResult<Enrollment> {
        let row = NewEnrollmentRow::new(tenant, enrollment);
        self.with_tenant(tenant, move |conn| {
            let student_owned: bool = diesel::select(diesel::dsl::exists(
                students::table
                    .filter(students::id.eq(row.student_id))
                    .filter(students::owner_id.eq(tenant.0)),
            ))
            .get_result(conn)?;
            if !student_owned {
                return Err(RepositoryError::missing(
                    "student",
                    row.student_id,
                    "create_enrollment",
                ));
            }
            let course_owned: bool = diesel::select(diesel::dsl::exists(
                courses::table
                    .filter(courses::id.eq(row.course_id))
                    .filter(courses::owner_id.eq(tenant.0)),
            ))
            .get_result(conn)?;
            if !course_owned {
                return Err(RepositoryError::missing(
                    "course",
                    row.course_id,
                    "create_enrollment",
                ));
            }

            let inserted: EnrollmentRow = diesel::insert_into(enrollments::table)
                .values(&row)
                .returning(EnrollmentRow::as_returning())
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("create_enrollment"))?;
            Enrollment::try_from(inserted)
        })
        .await
    }

    async fn update_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
        changes: &EnrollmentChanges,
    ) -> RepositoryResult<Enrollment> {
        let changes = EnrollmentChangeset::from(changes);
        self.with_tenant(tenant, move |conn| {
            let target = enrollments::table
                .filter(enrollments::id.eq(id.0))
                .filter(enrollments::owner_id.eq(tenant.0));
            let row: Option<EnrollmentRow> = if changes.is_empty() {
                target
                    .select(EnrollmentRow::as_select())
                    .first(conn)
                    .optional()?
            } else {
                diesel::update(target)
                    .set(&changes)
                    .returning(EnrollmentRow::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(|e| RepositoryError::from(e).with_operation("update_enrollment"))?
            };
            row.ok_or_else(|| RepositoryError::missing("enrollment", id, "update_enrollment"))
                .and_then(Enrollment::try_from)
        })
        .await
    }

    async fn delete_enrollment(
        &self,
        tenant: TenantId,
        id: EnrollmentId,
    ) -> RepositoryResult<()> {
        self.with_tenant(tenant, move |conn| {
            let deleted = diesel::delete(
                enrollments::table
                    .filter(enrollments::id.eq(id.0))
                    .filter(enrollments::owner_id.eq(tenant.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing(
                    "enrollment",
                    id,
                    "delete_enrollment",
                ));
            }
            Ok(())
        })
        .await
    }

    async fn count_enrollments(&self, tenant: TenantId) -> RepositoryResult<usize> {
        self.with_tenant(tenant, move |conn| {
            let total: i64 = enrollments::table
                .filter(enrollments::owner_id.eq(tenant.0))
                .count()
                .get_result(conn)?;
            Ok(total as usize)
        })
        .await
    }
}

// ==================== Analytics Repository ====================

#[async_trait]
impl AnalyticsRepository for PostgresRepository {
    async fn enrollment_facts(&self, tenant: TenantId) -> RepositoryResult<Vec<EnrollmentFact>> {
        self.with_tenant(tenant, move |conn| {
            let rows: Vec<(Option<String>, String, i32, String)> = enrollments::table
                .inner_join(courses::table)
                .filter(enrollments::owner_id.eq(tenant.0))
                .select((
                    enrollments::grade,
                    enrollments::status,
                    courses::credits,
                    courses::code,
                ))
                .load(conn)?;
            Ok(rows
                .into_iter()
                .map(|(grade, status, credits, course_code)| EnrollmentFact {
                    grade,
                    status,
                    credits,
                    course_code,
                })
                .collect())
        })
        .await
    }

    async fn course_departments(
        &self,
        tenant: TenantId,
    ) -> RepositoryResult<Vec<Option<String>>> {
        self.with_tenant(tenant, move |conn| {
            let departments = courses::table
                .filter(courses::owner_id.eq(tenant.0))
                .select(courses::department)
                .load::<Option<String>>(conn)?;
            Ok(departments)
        })
        .await
    }

    async fn recent_enrollments(
        &self,
        tenant: TenantId,
        limit: usize,
    ) -> RepositoryResult<Vec<EnrollmentDetail>> {
        self.with_tenant(tenant, move |conn| {
            let query = detail_filter(tenant, &EnrollmentQuery::all())
                .order((enrollments::enrolled_at.desc(), enrollments::id.desc()))
                .limit(limit as i64);
            load_details(conn, query)
        })
        .await
    }

    async fn distinct_values(
        &self,
        tenant: TenantId,
        field: DistinctField,
    ) -> RepositoryResult<Vec<String>> {
        self.with_tenant(tenant, move |conn| {
            let values: Vec<String> = match field {
                DistinctField::Department => courses::table
                    .filter(courses::owner_id.eq(tenant.0))
                    .select(courses::department)
                    .distinct()
                    .load::<Option<String>>(conn)?
                    .into_iter()
                    .flatten()
                    .collect(),
                DistinctField::Semester => enrollments::table
                    .filter(enrollments::owner_id.eq(tenant.0))
                    .select(enrollments::semester)
                    .distinct()
                    .load::<String>(conn)?,
            };
            Ok(distinct_sorted(values))
        })
        .await
    }

    async fn clear_tenant(&self, tenant: TenantId) -> RepositoryResult<ClearSummary> {
        self.with_tenant(tenant, move |conn| {
            let enrollments = diesel::delete(
                enrollments::table.filter(enrollments::owner_id.eq(tenant.0)),
            )
            .execute(conn)?;
            let students =
                diesel::delete(students::table.filter(students::owner_id.eq(tenant.0)))
                    .execute(conn)?;
            let courses = diesel::delete(courses::table.filter(courses::owner_id.eq(tenant.0)))
                .execute(conn)?;
            Ok(ClearSummary {
                students,
                courses,
                enrollments,
            })
        })
        .await
    }
}
