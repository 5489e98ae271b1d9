use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::users::spec::UserEntry, prelude::Result};

pub(super) const USER_COLUMNS: &str = "user_id, name, email, password_hash, role, profile_image, \
     phone, location, title, company, website, bio, skills, resume, created_at, updated_at";

pub struct UserSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserSelector { pool }
    }

    pub async fn get_by_id(&mut self, user_id: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }
}
