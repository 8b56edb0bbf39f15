//! Router configuration for the HTTP API.
//!
//! Sets up all routes plus the CORS, compression and tracing middleware.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{auth, dashboard, export, listing, seed, stats, HEALTH};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The browser client is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(HEALTH, get(handlers::health_check))
        // Accounts
        .route(auth::SIGN_UP, post(handlers::sign_up))
        .route(auth::SIGN_IN, post(handlers::sign_in))
        .route(auth::SIGN_OUT, post(handlers::sign_out))
        // Records
        .route(
            listing::STUDENTS,
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            listing::STUDENT,
            put(handlers::update_student).delete(handlers::delete_student),
        )
        .route(
            listing::COURSES,
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            listing::COURSE,
            put(handlers::update_course).delete(handlers::delete_course),
        )
        .route(
            listing::ENROLLMENTS,
            get(handlers::list_enrollments).post(handlers::create_enrollment),
        )
        .route(
            listing::ENROLLMENT,
            put(handlers::update_enrollment).delete(handlers::delete_enrollment),
        )
        .route(listing::DEPARTMENTS, get(handlers::list_departments))
        .route(listing::SEMESTERS, get(handlers::list_semesters))
        // Reporting
        .route(dashboard::DASHBOARD, get(handlers::get_dashboard))
        .route(stats::STATS, get(handlers::get_stats))
        .route(export::EXPORT_STUDENTS, get(handlers::export_students))
        .route(export::EXPORT_ENROLLMENTS, get(handlers::export_enrollments))
        // Demo data
        .route(
            seed::SEED,
            post(handlers::seed_data).delete(handlers::clear_data),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
