use std::sync::Arc;

use axum::{extract::State, Extension};
use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::users::{mutators::UserMutator, selectors::UserSelector, spec::UserEntry},
            auth::User,
        },
        server::{
            extractors::Json,
            state::{AppState, GetTxn},
        },
    },
    prelude::*,
};

#[derive(Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
    #[validate(length(max = 500, message = "Bio must be 500 characters or less"))]
    pub bio: Option<String>,
    #[validate(url(message = "Profile image must be a valid URL"))]
    pub profile_image: Option<String>,
    pub skills: Option<Vec<String>>,
    #[validate(url(message = "Resume must be a valid URL"))]
    pub resume: Option<String>,
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<UserEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let entry = UserSelector::new(&mut tx)
        .get_by_id(&user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(entry))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<UserEntry>> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let entry = UserMutator::new(&mut tx)
        .update_profile(&user.user_id, input)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    tx.commit().await?;
    tracing::debug!("profile updated for {}", &user.user_id);
    Ok(Json(entry))
}
