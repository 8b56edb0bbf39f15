use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::TenantId;

// =========================================================
// Account types + routes
// =========================================================

/// Credentials for sign-up and sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// The account a token resolves to. Its id is the tenant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: TenantId,
    pub email: String,
}

/// Bearer credential handed back on sign-up and sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

pub const MIN_PASSWORD_LEN: usize = 6;

pub const SIGN_UP: &str = "/api/auth/signup";
pub const SIGN_IN: &str = "/api/auth/signin";
pub const SIGN_OUT: &str = "/api/auth/signout";
