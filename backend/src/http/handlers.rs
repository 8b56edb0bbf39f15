//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. Every handler except health and sign-up/sign-in extracts a
//! [`TenantContext`], so an unauthenticated request never reaches a service.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::context::TenantContext;
use super::dto::{
    AuthRequest, AuthSession, ClearSummary, Course, CourseDraft, CourseListParams,
    DashboardData, DistinctValues, Enrollment, EnrollmentDetail, EnrollmentDraft,
    EnrollmentListParams, HealthResponse, LegacyStats, Page, SeedSummary, Student, StudentDraft,
    StudentListParams, SuccessResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{CourseId, EnrollmentId, StudentId};
use crate::db::query::{CourseQuery, DistinctField, EnrollmentQuery, StudentQuery};
use crate::db::services as db_services;
use crate::routes::export::{ENROLLMENTS_FILENAME, STUDENTS_FILENAME};
use crate::services::csv_export::{to_csv, CsvRecord};
use crate::services::{dashboard, seed};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Created-status variant of [`HandlerResult`].
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

/// Unwrap a JSON body, turning axum's rejection into a validation error.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|e| AppError::Validation {
        message: format!("Invalid request body: {}", e.body_text()),
        fields: Vec::new(),
    })
}

/// Unwrap a numeric `{id}` path segment.
fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|e| AppError::Validation {
        message: format!("Invalid id: {}", e.body_text()),
        fields: vec!["id".to_string()],
    })
}

/// Unwrap listing query parameters.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query.map(|Query(params)| params).map_err(|e| AppError::Validation {
        message: format!("Invalid query string: {}", e.body_text()),
        fields: Vec::new(),
    })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Service liveness plus record store connectivity. Public.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Accounts
// =============================================================================

/// POST /api/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> CreatedResult<AuthSession> {
    let request = json_body(payload)?;
    let session = state.identity.sign_up(&request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> HandlerResult<AuthSession> {
    let request = json_body(payload)?;
    Ok(Json(state.identity.sign_in(&request).await?))
}

/// POST /api/auth/signout
///
/// Revokes the token the request was authenticated with.
pub async fn sign_out(
    State(state): State<AppState>,
    ctx: TenantContext,
) -> HandlerResult<SuccessResponse> {
    state.identity.sign_out(&ctx.token).await?;
    Ok(Json(SuccessResponse::ok()))
}

// =============================================================================
// Students
// =============================================================================

/// GET /api/students?search=&course=&page=&all=
pub async fn list_students(
    ctx: TenantContext,
    params: Result<Query<StudentListParams>, QueryRejection>,
) -> HandlerResult<Page<Student>> {
    let query = StudentQuery::from(query_params(params)?);
    Ok(Json(
        db_services::list_students(ctx.repo(), ctx.tenant(), &query).await?,
    ))
}

/// POST /api/students
pub async fn create_student(
    ctx: TenantContext,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> CreatedResult<Student> {
    let draft = json_body(payload)?;
    let student = db_services::create_student(ctx.repo(), ctx.tenant(), draft).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /api/students/{id}
pub async fn update_student(
    ctx: TenantContext,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> HandlerResult<Student> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    Ok(Json(
        db_services::update_student(ctx.repo(), ctx.tenant(), StudentId::new(id), draft).await?,
    ))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    ctx: TenantContext,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<SuccessResponse> {
    let id = path_id(id)?;
    db_services::delete_student(ctx.repo(), ctx.tenant(), StudentId::new(id)).await?;
    Ok(Json(SuccessResponse::ok()))
}

// =============================================================================
// Courses
// =============================================================================

/// GET /api/courses?search=&department=&page=&all=
pub async fn list_courses(
    ctx: TenantContext,
    params: Result<Query<CourseListParams>, QueryRejection>,
) -> HandlerResult<Page<Course>> {
    let query = CourseQuery::from(query_params(params)?);
    Ok(Json(
        db_services::list_courses(ctx.repo(), ctx.tenant(), &query).await?,
    ))
}

/// POST /api/courses
pub async fn create_course(
    ctx: TenantContext,
    payload: Result<Json<CourseDraft>, JsonRejection>,
) -> CreatedResult<Course> {
    let draft = json_body(payload)?;
    let course = db_services::create_course(ctx.repo(), ctx.tenant(), draft).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/courses/{id}
pub async fn update_course(
    ctx: TenantContext,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CourseDraft>, JsonRejection>,
) -> HandlerResult<Course> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    Ok(Json(
        db_services::update_course(ctx.repo(), ctx.tenant(), CourseId::new(id), draft).await?,
    ))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    ctx: TenantContext,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<SuccessResponse> {
    let id = path_id(id)?;
    db_services::delete_course(ctx.repo(), ctx.tenant(), CourseId::new(id)).await?;
    Ok(Json(SuccessResponse::ok()))
}

// =============================================================================
// Enrollments
// =============================================================================

/// GET /api/enrollments?search=&semester=&grade=&status=&page=&all=
pub async fn list_enrollments(
    ctx: TenantContext,
    params: Result<Query<EnrollmentListParams>, QueryRejection>,
) -> HandlerResult<Page<EnrollmentDetail>> {
    let query = EnrollmentQuery::try_from(query_params(params)?)?;
    Ok(Json(
        db_services::list_enrollments(ctx.repo(), ctx.tenant(), &query).await?,
    ))
}

/// POST /api/enrollments
pub async fn create_enrollment(
    ctx: TenantContext,
    payload: Result<Json<EnrollmentDraft>, JsonRejection>,
) -> CreatedResult<Enrollment> {
    let draft = json_body(payload)?;
    let enrollment = db_services::create_enrollment(ctx.repo(), ctx.tenant(), draft).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// PUT /api/enrollments/{id}
pub async fn update_enrollment(
    ctx: TenantContext,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EnrollmentDraft>, JsonRejection>,
) -> HandlerResult<Enrollment> {
    let id = path_id(id)?;
    let draft = json_body(payload)?;
    Ok(Json(
        db_services::update_enrollment(ctx.repo(), ctx.tenant(), EnrollmentId::new(id), draft)
            .await?,
    ))
}

/// DELETE /api/enrollments/{id}
pub async fn delete_enrollment(
    ctx: TenantContext,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<SuccessResponse> {
    let id = path_id(id)?;
    db_services::delete_enrollment(ctx.repo(), ctx.tenant(), EnrollmentId::new(id)).await?;
    Ok(Json(SuccessResponse::ok()))
}

// =============================================================================
// Filter values
// =============================================================================

/// GET /api/departments
pub async fn list_departments(ctx: TenantContext) -> HandlerResult<DistinctValues> {
    let values =
        db_services::distinct_values(ctx.repo(), ctx.tenant(), DistinctField::Department).await?;
    Ok(Json(DistinctValues { values }))
}

/// GET /api/semesters
pub async fn list_semesters(ctx: TenantContext) -> HandlerResult<DistinctValues> {
    let values =
        db_services::distinct_values(ctx.repo(), ctx.tenant(), DistinctField::Semester).await?;
    Ok(Json(DistinctValues { values }))
}

// =============================================================================
// Reporting
// =============================================================================

/// GET /api/dashboard
///
/// Never fails once authenticated; unavailable sections come back empty.
pub async fn get_dashboard(ctx: TenantContext) -> HandlerResult<DashboardData> {
    Ok(Json(
        dashboard::build_dashboard(ctx.repo(), ctx.tenant()).await,
    ))
}

/// GET /api/stats
pub async fn get_stats(ctx: TenantContext) -> HandlerResult<LegacyStats> {
    Ok(Json(
        dashboard::legacy_stats(ctx.repo(), ctx.tenant()).await?,
    ))
}

/// `text/csv` attachment response.
fn csv_attachment(filename: &str, body: String) -> Response {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// Rows for an export, or none when the read fails. A failed read still
/// yields a header-only file.
fn export_rows<T: CsvRecord>(
    export: &str,
    result: crate::db::RepositoryResult<Page<T>>,
) -> Vec<T> {
    match result {
        Ok(page) => page.data,
        Err(e) => {
            tracing::warn!(export, error = %e, "export read failed, sending header only");
            Vec::new()
        }
    }
}

/// GET /api/export/students
pub async fn export_students(ctx: TenantContext) -> Response {
    let result = db_services::list_students(ctx.repo(), ctx.tenant(), &StudentQuery::all()).await;
    let rows = export_rows("students", result);
    csv_attachment(STUDENTS_FILENAME, to_csv(&rows))
}

/// GET /api/export/enrollments
pub async fn export_enrollments(ctx: TenantContext) -> Response {
    let result =
        db_services::list_enrollments(ctx.repo(), ctx.tenant(), &EnrollmentQuery::all()).await;
    let rows = export_rows("enrollments", result);
    csv_attachment(ENROLLMENTS_FILENAME, to_csv(&rows))
}

// =============================================================================
// Demo data
// =============================================================================

/// POST /api/seed
pub async fn seed_data(ctx: TenantContext) -> CreatedResult<SeedSummary> {
    let summary = seed::seed_demo_data(ctx.repo(), ctx.tenant()).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// DELETE /api/seed
pub async fn clear_data(ctx: TenantContext) -> HandlerResult<ClearSummary> {
    Ok(Json(
        seed::clear_tenant_data(ctx.repo(), ctx.tenant()).await?,
    ))
}
