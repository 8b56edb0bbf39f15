//! HTTP server module.
//!
//! An axum REST API over the service layer, repository traits and DTOs from
//! the core library.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - bearer token to TenantContext                         │
//! │  - JSON and CSV bodies, error mapping                    │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Services (db::services, services::*)                    │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                  │
//! │  - LocalRepository / PostgresRepository                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod context;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use context::TenantContext;
pub use error::AppError;
pub use router::create_router;
pub use state::AppState;
