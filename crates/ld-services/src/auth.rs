//! Admin authentication: credential verification and the session guard.
//!
//! Login follows Anonymous -> Authenticating -> Authenticated. An unknown
//! username and a wrong password both collapse into [`LoginError::InvalidCredentials`];
//! the unknown-username path still runs a full-cost bcrypt verification so the
//! two failures cost about the same. Session resolution collapses a malformed
//! token, an unknown account, and a storage failure into "no session" -- the
//! caller can never tell which one happened.

use std::sync::Arc;

use chrono::Utc;
use ld_core::{password, token};
use ld_db::{queries, Database, DbError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

#[derive(Debug, Error)]
#[error("Unauthorized")]
pub struct Unauthorized;

/// The public identity of an authenticated admin. Never carries the hash.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: i64,
    pub username: String,
}

pub struct AuthService {
    db: Arc<Database>,
}

impl AuthService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Authenticate a username/password pair. On success, returns a freshly
    /// issued bearer token plus the public identity; the caller is expected
    /// to transport the token as the session cookie.
    pub async fn login(
        &self,
        username: &str,
        plaintext_password: &str,
    ) -> Result<(String, SessionIdentity), LoginError> {
        let pool = self.db.pool().await?;

        let admin = match queries::get_admin_by_username(&pool, username).await? {
            Some(admin) => admin,
            None => {
                // Equalize cost with the password-mismatch path.
                password::burn_verification(plaintext_password);
                return Err(LoginError::InvalidCredentials);
            }
        };

        if !password::verify_password(plaintext_password, &admin.password_hash) {
            return Err(LoginError::InvalidCredentials);
        }

        let bearer = token::encode(admin.id, Utc::now());
        info!("Admin logged in: {}", admin.username);

        Ok((
            bearer,
            SessionIdentity {
                id: admin.id,
                username: admin.username,
            },
        ))
    }

    /// Resolve a bearer token into an admin identity, or `None` when the
    /// token is absent, malformed, or does not map to a stored account.
    pub async fn resolve_session(&self, bearer: Option<&str>) -> Option<SessionIdentity> {
        let decoded = token::decode(bearer?).ok()?;

        let pool = match self.db.pool().await {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Session lookup unavailable: {e}");
                return None;
            }
        };

        let admin = queries::get_admin_by_id(&pool, decoded.admin_id)
            .await
            .ok()
            .flatten()?;

        Some(SessionIdentity {
            id: admin.id,
            username: admin.username,
        })
    }

    /// Like [`resolve_session`](Self::resolve_session), but an absent session
    /// becomes [`Unauthorized`] for endpoints that must answer 401.
    pub async fn require_session(
        &self,
        bearer: Option<&str>,
    ) -> Result<SessionIdentity, Unauthorized> {
        self.resolve_session(bearer).await.ok_or(Unauthorized)
    }
}
