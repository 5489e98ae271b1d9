use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{conf::settings, pkg::server::state::AppState, prelude::*};

#[derive(Serialize, Deserialize, Type, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
    Admin,
}

/// Request-scoped identity resolved by the authn middleware and threaded to
/// handlers through an `Extension<Arc<User>>`.
#[derive(FromRow, Debug)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(FromRow, Debug)]
pub struct AuthToken {
    pub token: Uuid,
    pub user_id: String,
    pub expiry: DateTime<Utc>,
}

impl AuthToken {
    pub async fn issue(conn: &mut PgConnection, user_id: &str) -> Result<Self> {
        Self::purge_expired(&mut *conn).await?;
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO tokens (token, user_id, expiry)
            VALUES ($1, $2, now() + make_interval(hours => $3))
            RETURNING token, user_id, expiry
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(settings.token_ttl_hours)
        .fetch_one(&mut *conn)
        .await?;
        tracing::debug!("issued token for user {}", user_id);
        Ok(token)
    }

    /// Expired rows can never authenticate again; every issue reclaims them
    /// so the table tracks only live sessions.
    pub async fn purge_expired(conn: &mut PgConnection) -> Result<u64> {
        let purged = sqlx::query("DELETE FROM tokens WHERE expiry <= now()")
            .execute(&mut *conn)
            .await?
            .rows_affected();
        if purged > 0 {
            tracing::debug!("purged {} expired tokens", purged);
        }
        Ok(purged)
    }

    pub async fn check_token_validity(state: &AppState, token_str: &str) -> Result<User> {
        let token = token_str
            .parse::<Uuid>()
            .map_err(|_| AppError::Unauthenticated("Invalid or expired token"))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.email, u.name, u.role
            FROM users u
            JOIN tokens t ON t.user_id = u.user_id
            WHERE t.token = $1
            AND t.expiry > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&*state.db_pool)
        .await?
        .ok_or(AppError::Unauthenticated("Invalid or expired token"))?;
        Ok(user)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal("password hashing failed"))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn test_password_round_trip() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_garbled_hash_never_verifies() {
        assert!(!verify_password("hunter22", "not-a-phc-string"));
    }

    #[test]
    fn test_role_wire_form() {
        assert_eq!(serde_json::to_string(&Role::JobSeeker).unwrap(), r#""jobSeeker""#);
        assert_eq!(serde_json::to_string(&Role::Employer).unwrap(), r#""employer""#);
        let role: Role = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, Role::Admin);
    }
}
