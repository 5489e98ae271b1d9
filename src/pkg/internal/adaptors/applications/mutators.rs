use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::applications::spec::{ApplicationEntry, ApplicationStatus},
    pkg::server::handlers::applications::ApplyInput,
    prelude::Result,
};

pub struct ApplicationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationMutator { pool }
    }

    pub async fn create(
        &mut self,
        job_id: i32,
        applicant_id: &str,
        input: &ApplyInput,
    ) -> Result<ApplicationEntry> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            INSERT INTO applications (job_id, applicant_id, resume_url, cover_letter, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, applicant_id, resume_url, cover_letter, phone, status, applied_at, notes
            "#,
        )
        .bind(job_id)
        .bind(applicant_id)
        .bind(&input.resume_url)
        .bind(&input.cover_letter)
        .bind(&input.phone)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn set_status(
        &mut self,
        id: i32,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            UPDATE applications SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, job_id, applicant_id, resume_url, cover_letter, phone, status, applied_at, notes
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
