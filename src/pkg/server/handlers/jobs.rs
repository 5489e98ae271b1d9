use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    Extension,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    errors::parse_id,
    pkg::{
        internal::{
            adaptors::jobs::{
                mutators::JobMutator,
                selectors::JobSelector,
                spec::{JobEntry, JobFilters},
            },
            auth::User,
            authz::{ensure_owner, ensure_owner_or_admin},
        },
        server::{
            extractors::Json,
            state::{AppState, GetTxn},
        },
    },
    prelude::*,
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[validate(length(min = 5, message = "Job title must be at least 5 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company: String,
    #[validate(url(message = "Company logo must be a valid URL"))]
    pub company_logo: Option<String>,
    #[validate(url(message = "Company website must be a valid URL"))]
    pub company_website: Option<String>,
    pub company_description: Option<String>,
    #[validate(length(min = 1, message = "Job location is required"))]
    pub location: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Job type is required"))]
    pub job_type: String,
    #[validate(length(min = 1, message = "Experience level is required"))]
    pub experience: String,
    #[validate(length(min = 1, message = "Salary range is required"))]
    pub salary: String,
    #[validate(length(min = 50, message = "Job description must be at least 50 characters"))]
    pub description: String,
    #[validate(length(min = 30, message = "Requirements must be at least 30 characters"))]
    pub requirements: String,
    #[validate(length(min = 30, message = "Responsibilities must be at least 30 characters"))]
    pub responsibilities: String,
    #[validate(length(min = 1, message = "Required skills are required"))]
    pub skills: String,
    pub closing_date: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct PatchJobInput {
    #[validate(length(min = 5, message = "Job title must be at least 5 characters"))]
    pub title: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    #[validate(length(min = 50, message = "Job description must be at least 50 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 30, message = "Requirements must be at least 30 characters"))]
    pub requirements: Option<String>,
    #[validate(length(min = 30, message = "Responsibilities must be at least 30 characters"))]
    pub responsibilities: Option<String>,
    pub skills: Option<String>,
    pub closing_date: Option<DateTime<Utc>>,
    #[validate(url(message = "Company logo must be a valid URL"))]
    pub company_logo: Option<String>,
    #[validate(url(message = "Company website must be a valid URL"))]
    pub company_website: Option<String>,
    pub company_description: Option<String>,
}

#[derive(Deserialize)]
pub struct ListJobsQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<JobEntry>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<JobPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let filters = JobFilters {
        search: query.search,
        job_type: query.job_type,
        experience: query.experience,
        location: query.location,
    };

    let mut tx = state.db_pool.begin_txn().await?;
    let total = JobSelector::new(&mut tx).count(&filters).await?;
    let jobs = JobSelector::new(&mut tx)
        .list(&filters, limit, (page - 1) * limit)
        .await?;

    Ok(Json(JobPage {
        jobs,
        total_pages: total_pages(total, limit),
        current_page: page,
        total,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<JobEntry>> {
    let id = parse_id(&id, "Job not found")?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    Ok(Json(job))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(&input, &user.user_id).await?;
    tx.commit().await?;
    tracing::info!("job {} posted by {}", job.id, &user.user_id);
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(id): AxumPath<String>,
    Json(input): Json<PatchJobInput>,
) -> Result<Json<JobEntry>> {
    input.validate()?;
    let id = parse_id(&id, "Job not found")?;

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    ensure_owner(&user, &job)?;

    let updated = JobMutator::new(&mut tx)
        .update(id, input)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    tx.commit().await?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Value>> {
    let id = parse_id(&id, "Job not found")?;

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    ensure_owner_or_admin(&user, &job)?;

    JobMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    tracing::info!("job {} removed by {}", id, &user.user_id);
    Ok(Json(json!({ "message": "Job removed" })))
}

pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).get_by_owner(&user.user_id).await?;
    Ok(Json(jobs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_page_three_of_twenty_five() {
        // limit=10 over 25 records leaves 5 on the last page
        let total: i64 = 25;
        let limit: i64 = 10;
        let page: i64 = 3;
        let offset = (page - 1) * limit;
        assert_eq!(total_pages(total, limit), 3);
        assert_eq!(total - offset, 5);
    }

    #[test]
    fn test_create_input_field_messages() {
        let input = CreateJobInput {
            title: "dev".to_string(),
            company: "Acme".to_string(),
            company_logo: None,
            company_website: None,
            company_description: None,
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            experience: "Senior".to_string(),
            salary: "competitive".to_string(),
            description: "short".to_string(),
            requirements: "Rust".to_string(),
            responsibilities: "Ship".to_string(),
            skills: "rust".to_string(),
            closing_date: Utc::now(),
        };
        match AppError::from(input.validate().unwrap_err()) {
            AppError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"title"));
                assert!(fields.contains(&"description"));
                assert!(fields.contains(&"requirements"));
                assert!(fields.contains(&"responsibilities"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}
