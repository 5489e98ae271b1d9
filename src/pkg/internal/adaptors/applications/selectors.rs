use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::applications::spec::{
        ApplicationApplicantRow, ApplicationEntry, ApplicationJobRow,
    },
    prelude::Result,
};

const APPLICATION_COLUMNS: &str =
    "id, job_id, applicant_id, resume_url, cover_letter, phone, status, applied_at, notes";

pub struct ApplicationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find(&mut self, job_id: i32, applicant_id: &str) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1 AND applicant_id = $2"
        ))
        .bind(job_id)
        .bind(applicant_id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_for_applicant(&mut self, applicant_id: &str) -> Result<Vec<ApplicationJobRow>> {
        let rows = sqlx::query_as::<_, ApplicationJobRow>(
            r#"
            SELECT a.id, a.job_id, a.resume_url, a.cover_letter, a.phone, a.status,
                   a.applied_at, a.notes,
                   j.title AS job_title, j.company AS job_company,
                   j.company_logo AS job_company_logo, j.location AS job_location,
                   j.job_type AS job_job_type
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.applicant_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(applicant_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_for_job(&mut self, job_id: i32) -> Result<Vec<ApplicationApplicantRow>> {
        let rows = sqlx::query_as::<_, ApplicationApplicantRow>(
            r#"
            SELECT a.id, a.job_id, a.resume_url, a.cover_letter, a.phone, a.status,
                   a.applied_at, a.notes,
                   u.user_id AS applicant_id, u.name AS applicant_name,
                   u.email AS applicant_email, u.profile_image AS applicant_profile_image
            FROM applications a
            JOIN users u ON u.user_id = a.applicant_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
