use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    Extension,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::parse_id,
    pkg::{
        internal::{
            adaptors::{
                applications::{
                    mutators::ApplicationMutator,
                    selectors::ApplicationSelector,
                    spec::{ApplicationEntry, ApplicationStatus},
                },
                jobs::{mutators::JobMutator, selectors::JobSelector},
            },
            auth::User,
            authz::ensure_owner_or_admin,
        },
        server::{
            extractors::Json,
            state::{AppState, GetTxn},
        },
    },
    prelude::*,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyInput {
    #[validate(length(min = 1, message = "Job ID is required"))]
    pub job_id: String,
    #[validate(length(min = 50, message = "Cover letter must be at least 50 characters"))]
    pub cover_letter: String,
    #[validate(url(message = "Resume URL must be a valid URL"))]
    pub resume_url: String,
    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    pub phone: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub company_logo: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    pub id: i32,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub resume_url: String,
    pub cover_letter: String,
    pub phone: String,
    pub notes: String,
    pub job: JobSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub profile_image: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithApplicant {
    pub id: i32,
    pub job_id: i32,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub resume_url: String,
    pub cover_letter: String,
    pub phone: String,
    pub notes: String,
    pub applicant: ApplicantSummary,
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<ApplyInput>,
) -> Result<(StatusCode, Json<ApplicationEntry>)> {
    input.validate()?;
    let job_id = parse_id(&input.job_id, "Job not found")?;

    // duplicate pre-check is an optimization; the unique (job, applicant)
    // index is the authority under concurrent submissions
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(job_id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    if ApplicationSelector::new(&mut tx)
        .find(job.id, &user.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("You have already applied for this job"));
    }

    let application = match ApplicationMutator::new(&mut tx)
        .create(job.id, &user.user_id, &input)
        .await
    {
        Ok(application) => application,
        Err(AppError::Conflict(_)) => {
            return Err(AppError::Conflict("You have already applied for this job"));
        }
        Err(err) => return Err(err),
    };
    JobMutator::new(&mut tx).increment_applications(job.id).await?;
    tx.commit().await?;

    tracing::info!("user {} applied to job {}", &user.user_id, job.id);
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<ApplicationWithJob>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let rows = ApplicationSelector::new(&mut tx)
        .get_for_applicant(&user.user_id)
        .await?;
    let applications = rows
        .into_iter()
        .map(|row| ApplicationWithJob {
            id: row.id,
            status: row.status,
            applied_at: row.applied_at,
            resume_url: row.resume_url,
            cover_letter: row.cover_letter,
            phone: row.phone,
            notes: row.notes,
            job: JobSummary {
                id: row.job_id,
                title: row.job_title,
                company: row.job_company,
                company_logo: row.job_company_logo,
                location: row.job_location,
                job_type: row.job_job_type,
            },
        })
        .collect();
    Ok(Json(applications))
}

pub async fn list_for_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(job_id): AxumPath<String>,
) -> Result<Json<Vec<ApplicationWithApplicant>>> {
    let job_id = parse_id(&job_id, "Job not found")?;

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(job_id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    ensure_owner_or_admin(&user, &job)?;

    let rows = ApplicationSelector::new(&mut tx).get_for_job(job.id).await?;
    let applications = rows
        .into_iter()
        .map(|row| ApplicationWithApplicant {
            id: row.id,
            job_id: row.job_id,
            status: row.status,
            applied_at: row.applied_at,
            resume_url: row.resume_url,
            cover_letter: row.cover_letter,
            phone: row.phone,
            notes: row.notes,
            applicant: ApplicantSummary {
                user_id: row.applicant_id,
                name: row.applicant_name,
                email: row.applicant_email,
                profile_image: row.applicant_profile_image,
            },
        })
        .collect();
    Ok(Json(applications))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(id): AxumPath<String>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<ApplicationEntry>> {
    let status: ApplicationStatus = input.status.parse().map_err(|_| {
        AppError::validation(
            "status",
            "Status must be one of Pending, Reviewed, Interview, Offer, Rejected",
        )
    })?;
    let id = parse_id(&id, "Application not found")?;

    let mut tx = state.db_pool.begin_txn().await?;
    let application = ApplicationSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Application not found"))?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(application.job_id)
        .await?
        .ok_or(AppError::NotFound("Job not found"))?;
    ensure_owner_or_admin(&user, &job)?;

    let updated = ApplicationMutator::new(&mut tx)
        .set_status(application.id, status)
        .await?
        .ok_or(AppError::NotFound("Application not found"))?;
    tx.commit().await?;

    tracing::info!("application {} moved to {:?}", updated.id, updated.status);
    Ok(Json(updated))
}
