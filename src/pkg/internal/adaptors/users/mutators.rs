use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::pkg::internal::adaptors::users::selectors::USER_COLUMNS;
use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::internal::auth::Role;
use crate::pkg::server::handlers::users::UpdateProfileInput;
use crate::prelude::Result;

pub struct UserMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserMutator { pool }
    }

    pub async fn create(
        &mut self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<UserEntry> {
        let row = sqlx::query_as::<_, UserEntry>(&format!(
            r#"
            INSERT INTO users (user_id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Allow-list partial update; role, email and password are not mutable
    /// through the profile.
    pub async fn update_profile(
        &mut self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> Result<Option<UserEntry>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE users SET updated_at = now()");

        if let Some(name) = input.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(phone) = input.phone {
            qb.push(", phone = ").push_bind(phone);
        }
        if let Some(location) = input.location {
            qb.push(", location = ").push_bind(location);
        }
        if let Some(title) = input.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(company) = input.company {
            qb.push(", company = ").push_bind(company);
        }
        if let Some(website) = input.website {
            qb.push(", website = ").push_bind(website);
        }
        if let Some(bio) = input.bio {
            qb.push(", bio = ").push_bind(bio);
        }
        if let Some(profile_image) = input.profile_image {
            qb.push(", profile_image = ").push_bind(profile_image);
        }
        if let Some(skills) = input.skills {
            qb.push(", skills = ").push_bind(skills);
        }
        if let Some(resume) = input.resume {
            qb.push(", resume = ").push_bind(resume);
        }

        qb.push(" WHERE user_id = ").push_bind(user_id.to_string());
        qb.push(format!(" RETURNING {USER_COLUMNS}"));

        let row = qb
            .build_query_as::<UserEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }
}
