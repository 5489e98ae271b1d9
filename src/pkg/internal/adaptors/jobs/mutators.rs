use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::selectors::JOB_COLUMNS;
use crate::pkg::internal::adaptors::jobs::spec::{split_commas, split_lines, JobEntry};
use crate::pkg::server::handlers::jobs::{CreateJobInput, PatchJobInput};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &CreateJobInput, posted_by: &str) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            INSERT INTO jobs (
                title, company, company_logo, company_website, company_description,
                location, job_type, experience, salary, description,
                requirements, responsibilities, skills, closing_date, posted_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.title)
        .bind(&job.company)
        .bind(job.company_logo.as_deref().unwrap_or(""))
        .bind(job.company_website.as_deref().unwrap_or(""))
        .bind(job.company_description.as_deref().unwrap_or(""))
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.experience)
        .bind(&job.salary)
        .bind(&job.description)
        .bind(split_lines(&job.requirements))
        .bind(split_lines(&job.responsibilities))
        .bind(split_commas(&job.skills))
        .bind(job.closing_date)
        .bind(posted_by)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Partial update over a fixed allow-list; list-typed fields re-split
    /// their text form exactly as `create` does.
    pub async fn update(&mut self, id: i32, job: PatchJobInput) -> Result<Option<JobEntry>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE jobs SET updated_at = now()");

        if let Some(title) = job.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(location) = job.location {
            qb.push(", location = ").push_bind(location);
        }
        if let Some(job_type) = job.job_type {
            qb.push(", job_type = ").push_bind(job_type);
        }
        if let Some(experience) = job.experience {
            qb.push(", experience = ").push_bind(experience);
        }
        if let Some(salary) = job.salary {
            qb.push(", salary = ").push_bind(salary);
        }
        if let Some(description) = job.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(requirements) = job.requirements {
            qb.push(", requirements = ").push_bind(split_lines(&requirements));
        }
        if let Some(responsibilities) = job.responsibilities {
            qb.push(", responsibilities = ")
                .push_bind(split_lines(&responsibilities));
        }
        if let Some(skills) = job.skills {
            qb.push(", skills = ").push_bind(split_commas(&skills));
        }
        if let Some(closing_date) = job.closing_date {
            qb.push(", closing_date = ").push_bind(closing_date);
        }
        if let Some(company_logo) = job.company_logo {
            qb.push(", company_logo = ").push_bind(company_logo);
        }
        if let Some(company_website) = job.company_website {
            qb.push(", company_website = ").push_bind(company_website);
        }
        if let Some(company_description) = job.company_description {
            qb.push(", company_description = ").push_bind(company_description);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {JOB_COLUMNS}"));

        let row = qb
            .build_query_as::<JobEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn increment_applications(&mut self, id: i32) -> Result<()> {
        sqlx::query("UPDATE jobs SET applications = applications + 1, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(())
    }
}
