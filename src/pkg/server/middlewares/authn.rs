use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    pkg::{internal::auth::AuthToken, server::state::AppState},
    prelude::*,
};

/// Resolves the caller's identity from the bearer credential and threads it
/// to handlers as an `Extension<Arc<User>>`.
pub async fn authenticate(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::warn!("bearer token missing, authentication denied");
        return Err(AppError::Unauthenticated("Authentication required"));
    };
    let user = AuthToken::check_token_validity(&state, bearer.token()).await?;
    request.extensions_mut().insert(Arc::new(user));
    Ok(next.run(request).await)
}
