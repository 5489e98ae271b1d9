use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::prelude::*;

/// Drop-in replacement for `axum::Json` whose rejection carries the same
/// `{"message", "errors"}` body as every other failure instead of axum's
/// plain-text 422.
#[derive(Debug)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation("body", &rejection.body_text()))?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;
    use crate::pkg::internal::auth::Role;

    #[derive(Debug, Deserialize)]
    struct SignupBody {
        #[allow(dead_code)]
        role: Role,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_field_errors() {
        let err = Json::<SignupBody>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors[0].field, "body"),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_out_of_enum_role_becomes_field_errors() {
        let err = Json::<SignupBody>::from_request(json_request(r#"{"role":"wizard"}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
