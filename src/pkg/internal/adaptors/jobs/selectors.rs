use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobEntry, JobFilters},
    prelude::Result,
};

pub(super) const JOB_COLUMNS: &str = "id, title, company, company_logo, company_website, company_description, \
     location, job_type, experience, salary, description, requirements, responsibilities, skills, \
     posted_at, closing_date, applications, posted_by, created_at, updated_at";

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &JobFilters) {
    qb.push(" WHERE true");
    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR company ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR array_to_string(skills, ' ') ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(job_type) = &filters.job_type {
        qb.push(" AND job_type = ").push_bind(job_type.clone());
    }
    if let Some(experience) = &filters.experience {
        qb.push(" AND experience = ").push_bind(experience.clone());
    }
    if let Some(location) = &filters.location {
        qb.push(" AND location = ").push_bind(location.clone());
    }
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list(
        &mut self,
        filters: &JobFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobEntry>> {
        let mut qb = QueryBuilder::new(format!("SELECT {JOB_COLUMNS} FROM jobs"));
        push_filters(&mut qb, filters);
        qb.push(" ORDER BY posted_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count(&mut self, filters: &JobFilters) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT count(*) FROM jobs");
        push_filters(&mut qb, filters);
        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }

    pub async fn get_by_owner(&mut self, owner_id: &str) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE posted_by = $1 ORDER BY posted_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
