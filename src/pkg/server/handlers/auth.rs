use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::users::{mutators::UserMutator, selectors::UserSelector, spec::UserEntry},
            auth::{hash_password, verify_password, AuthToken, Role},
        },
        server::{
            extractors::Json,
            state::{AppState, GetTxn},
        },
    },
    prelude::*,
};

#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: Uuid,
    pub user: UserEntry,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    let role = input.role.unwrap_or(Role::JobSeeker);
    if role == Role::Admin {
        return Err(AppError::validation(
            "role",
            "Role must be either jobSeeker or employer",
        ));
    }
    let email = input.email.trim().to_lowercase();

    let mut tx = state.db_pool.begin_txn().await?;
    if UserSelector::new(&mut tx).get_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("An account with this email already exists"));
    }
    let password_hash = hash_password(&input.password)?;
    let user = UserMutator::new(&mut tx)
        .create(input.name.trim(), &email, &password_hash, role)
        .await?;
    let token = AuthToken::issue(&mut tx, &user.user_id).await?;
    tx.commit().await?;

    tracing::info!("registered user {}", &user.user_id);
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: token.token,
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<AuthResponse>> {
    input.validate()?;
    let email = input.email.trim().to_lowercase();

    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserSelector::new(&mut tx)
        .get_by_email(&email)
        .await?
        .ok_or(AppError::Unauthenticated("Invalid credentials"))?;
    if !verify_password(&input.password, &user.password_hash) {
        return Err(AppError::Unauthenticated("Invalid credentials"));
    }
    let token = AuthToken::issue(&mut tx, &user.user_id).await?;
    tx.commit().await?;

    tracing::info!("user {} logged in", &user.user_id);
    Ok(Json(AuthResponse {
        token: token.token,
        user,
    }))
}
