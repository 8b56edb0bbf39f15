//! In-memory identity provider.
//!
//! Accounts and sessions live in process memory and vanish on restart. Good
//! enough for development, demos and tests; production deployments front a
//! hosted provider implementing the same trait.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::{IdentityError, IdentityResult};
use super::password::{generate_salt, hash_password, verify_password};
use super::provider::IdentityProvider;
use crate::api::{AuthRequest, AuthSession, AuthUser, TenantId};
use crate::db::repo_config::{AuthSettings, DEFAULT_SESSION_TTL_SECS};
use crate::routes::auth::MIN_PASSWORD_LEN;

const TOKEN_TYPE: &str = "bearer";

/// Ten years.
const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 3600;

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    salt: String,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct Session {
    user: AuthUser,
    expires_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Default)]
struct IdentityData {
    /// Keyed by lower-cased email.
    accounts: HashMap<String, Account>,
    /// Keyed by access token.
    sessions: HashMap<String, Session>,
}

/// Identity provider backed by process memory.
#[derive(Debug, Clone)]
pub struct LocalIdentityProvider {
    data: Arc<RwLock<IdentityData>>,
    session_ttl: Duration,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::with_ttl_secs(DEFAULT_SESSION_TTL_SECS)
    }

    pub fn with_settings(settings: &AuthSettings) -> Self {
        Self::with_ttl_secs(settings.session_ttl_secs)
    }

    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        let ttl_secs = ttl_secs.min(MAX_SESSION_TTL_SECS) as i64;
        Self {
            data: Arc::new(RwLock::new(IdentityData::default())),
            session_ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Number of live and expired sessions currently held.
    pub fn session_count(&self) -> usize {
        self.data.read().sessions.len()
    }

    fn open_session(&self, data: &mut IdentityData, user: AuthUser) -> AuthSession {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.session_ttl).unwrap_or(now);
        let access_token = uuid::Uuid::new_v4().simple().to_string();

        data.sessions.retain(|_, s| s.expires_at > now);
        data.sessions.insert(
            access_token.clone(),
            Session {
                user: user.clone(),
                expires_at,
            },
        );

        AuthSession {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_at,
            user,
        }
    }
}

/// Validated (email, password) pair.
struct Credentials {
    email: String,
    password: String,
}

fn credentials(request: &AuthRequest) -> IdentityResult<Credentials> {
    let email = crate::models::non_blank(request.email.clone());
    let password = request.password.clone().filter(|p| !p.is_empty());

    let mut missing = Vec::new();
    if email.is_none() {
        missing.push("email".to_string());
    }
    if password.is_none() {
        missing.push("password".to_string());
    }

    match (email, password) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(IdentityError::validation(
            "Email and password are required",
            missing,
        )),
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, request: &AuthRequest) -> IdentityResult<AuthSession> {
        let creds = credentials(request)?;
        if !creds.email.contains('@') {
            return Err(IdentityError::validation(
                "Email address is not valid",
                vec!["email".to_string()],
            ));
        }
        if creds.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::validation(
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
                vec!["password".to_string()],
            ));
        }

        let key = creds.email.to_lowercase();
        let mut data = self.data.write();
        if data.accounts.contains_key(&key) {
            return Err(IdentityError::AccountExists);
        }

        let salt = generate_salt();
        let user = AuthUser {
            id: TenantId::generate(),
            email: creds.email,
        };
        data.accounts.insert(
            key,
            Account {
                user: user.clone(),
                password_hash: hash_password(&salt, &creds.password),
                salt,
            },
        );
        log::info!("Registered account {}", user.id);

        Ok(self.open_session(&mut data, user))
    }

    async fn sign_in(&self, request: &AuthRequest) -> IdentityResult<AuthSession> {
        let creds = credentials(request)?;
        let mut data = self.data.write();

        let user = match data.accounts.get(&creds.email.to_lowercase()) {
            Some(account)
                if verify_password(&account.salt, &creds.password, &account.password_hash) =>
            {
                account.user.clone()
            }
            _ => return Err(IdentityError::InvalidCredentials),
        };

        Ok(self.open_session(&mut data, user))
    }

    async fn sign_out(&self, token: &str) -> IdentityResult<()> {
        match self.data.write().sessions.remove(token) {
            Some(_) => Ok(()),
            None => Err(IdentityError::InvalidToken),
        }
    }

    async fn resolve(&self, token: &str) -> IdentityResult<AuthUser> {
        let now = Utc::now();
        {
            let data = self.data.read();
            match data.sessions.get(token) {
                Some(session) if session.expires_at > now => return Ok(session.user.clone()),
                None => return Err(IdentityError::InvalidToken),
                Some(_) => {}
            }
        }

        // Expired sessions are dropped on sight.
        self.data.write().sessions.remove(token);
        Err(IdentityError::InvalidToken)
    }
}
