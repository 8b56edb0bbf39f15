//! Request-scoped tenant resolution.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::sync::Arc;

use super::error::AppError;
use super::state::AppState;
use crate::api::{AuthUser, TenantId};
use crate::db::repository::FullRepository;

/// The authenticated caller and a repository handle, built for one request
/// and dropped with it.
///
/// Extracting it fails with 401 unless the request carries
/// `Authorization: Bearer <token>` for a live session.
pub struct TenantContext {
    pub user: AuthUser,
    pub token: String,
    repository: Arc<dyn FullRepository>,
}

impl TenantContext {
    pub fn tenant(&self) -> TenantId {
        self.user.id
    }

    pub fn repo(&self) -> &dyn FullRepository {
        self.repository.as_ref()
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthenticated("Missing bearer token".to_string()))?
            .to_string();
        let user = state.identity.resolve(&token).await?;

        Ok(TenantContext {
            user,
            token,
            repository: state.repository.clone(),
        })
    }
}
