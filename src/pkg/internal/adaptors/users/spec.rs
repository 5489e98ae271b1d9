use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::pkg::internal::auth::Role;

#[derive(Serialize, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub profile_image: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub company: String,
    pub website: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub resume: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
