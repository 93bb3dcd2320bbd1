//! Request identity extraction.
//!
//! Authentication itself is owned by the identity provider sitting in front of
//! this service; it injects the provider-side subject id as a request header.
//! Every pipeline entry point extracts `ExternalId` and fails with
//! `Unauthorized` when the header is absent.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

/// Header carrying the identity-provider subject for the calling user.
pub const EXTERNAL_ID_HEADER: &str = "x-external-id";

/// The authenticated caller's external (identity-provider) id.
#[derive(Debug, Clone)]
pub struct ExternalId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ExternalId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(EXTERNAL_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| ExternalId(value.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<ExternalId, AppError> {
        let (mut parts, _) = request.into_parts();
        ExternalId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().uri("/api/v1/insights").body(()).unwrap();
        let result = extract(request).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_blank_header_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/v1/insights")
            .header(EXTERNAL_ID_HEADER, "   ")
            .body(())
            .unwrap();
        let result = extract(request).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_present_header_extracts_subject() {
        let request = Request::builder()
            .uri("/api/v1/insights")
            .header(EXTERNAL_ID_HEADER, "user_2abc")
            .body(())
            .unwrap();
        let ExternalId(id) = extract(request).await.unwrap();
        assert_eq!(id, "user_2abc");
    }
}
