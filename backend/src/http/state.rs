//! Application state for the HTTP server.

use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
///
/// Holds only the two collaborator handles; everything tenant-specific is
/// built per request in [`super::context::TenantContext`].
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub repository: Arc<dyn FullRepository>,
    /// Account and token management
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            repository,
            identity,
        }
    }
}
