use async_trait::async_trait;

use super::error::IdentityResult;
use crate::api::{AuthRequest, AuthSession, AuthUser};

/// Account and bearer-token management.
///
/// The id of the resolved [`AuthUser`] is the tenant every record operation
/// is scoped to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    async fn sign_up(&self, request: &AuthRequest) -> IdentityResult<AuthSession>;

    /// Exchange credentials for a fresh bearer token.
    async fn sign_in(&self, request: &AuthRequest) -> IdentityResult<AuthSession>;

    /// Revoke a token. Revoking an unknown token is an error.
    async fn sign_out(&self, token: &str) -> IdentityResult<()>;

    /// Resolve a live token to its account.
    async fn resolve(&self, token: &str) -> IdentityResult<AuthUser>;
}
