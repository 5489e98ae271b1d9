use std::sync::Arc;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::{
    pkg::internal::auth::{Role, User},
    prelude::*,
};

async fn allow(roles: &[Role], request: Request, next: Next) -> Result<Response> {
    let user = request
        .extensions()
        .get::<Arc<User>>()
        .cloned()
        .ok_or(AppError::Unauthenticated("Authentication required"))?;
    if !roles.contains(&user.role) {
        tracing::warn!("role {:?} not permitted for {}", user.role, request.uri());
        return Err(AppError::Forbidden("Insufficient permissions"));
    }
    Ok(next.run(request).await)
}

pub async fn employer_only(request: Request, next: Next) -> Result<Response> {
    allow(&[Role::Employer], request, next).await
}

pub async fn job_seeker_only(request: Request, next: Next) -> Result<Response> {
    allow(&[Role::JobSeeker], request, next).await
}
