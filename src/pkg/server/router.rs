use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, post, put};
use axum::{routing::get, Router};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::{authn, roles};
use super::state::AppState;
use crate::prelude::Result;

pub fn build_routes() -> Result<Router> {
    let state = AppState::new()?;
    let app = Router::new()
        .route(
            "/jobs",
            post(handlers::jobs::create).route_layer(from_fn(roles::employer_only)),
        )
        .route(
            "/jobs/employer/me",
            get(handlers::jobs::list_mine).route_layer(from_fn(roles::employer_only)),
        )
        .route("/jobs/:id", put(handlers::jobs::update))
        .route("/jobs/:id", delete(handlers::jobs::delete))
        .route(
            "/applications",
            post(handlers::applications::submit).route_layer(from_fn(roles::job_seeker_only)),
        )
        .route(
            "/applications/me",
            get(handlers::applications::list_mine).route_layer(from_fn(roles::job_seeker_only)),
        )
        .route("/applications/job/:job_id", get(handlers::applications::list_for_job))
        .route("/applications/:id/status", put(handlers::applications::update_status))
        .route(
            "/users/profile",
            get(handlers::users::profile).put(handlers::users::update_profile),
        )
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs/:id", get(handlers::jobs::get))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
