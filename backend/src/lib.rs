//! # Enrollment Tracker
//!
//! Multi-tenant record keeping for students, courses and enrollments.
//!
//! Every account is a tenant: its bearer token resolves to a tenant id, and
//! every read and write is scoped to that id. On top of the CRUD surface the
//! crate offers paginated search listings, CSV export, a statistics
//! dashboard (credit-weighted GPA, grade distribution, course popularity,
//! recent activity) and demo data seeding.
//!
//! ## Architecture
//!
//! - [`api`]: identifier types and response DTOs
//! - [`models`]: domain records, request drafts, grade scale
//! - [`db`]: repository traits, local and Postgres backends, service layer
//! - [`auth`]: identity provider trait and in-memory implementation
//! - [`services`]: dashboard aggregation, CSV export, seeding
//! - [`routes`]: route paths and route-specific response types
//! - [`http`]: axum router, handlers and error mapping

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod auth;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
