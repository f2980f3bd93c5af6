// Error responses for the HTTP boundary
//
// Every failure leaves the service as `{"error": "<message>"}` with a status
// code; nothing else about the failure is exposed.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::billing::BillingError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Upstream failure where the caller expects a 500
    pub fn internal(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{err:#}"))
    }

    /// Upstream failure where the caller expects a 400
    pub fn bad_request(err: anyhow::Error) -> Self {
        ApiError::BadRequest(format!("{err:#}"))
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{self}");
        } else {
            tracing::warn!(%status, "{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `Json<T>` whose rejection is an [`ApiError`], so malformed bodies get the
/// same error shape as everything else.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_billing_errors_are_bad_requests() {
        let err: ApiError = BillingError::UnknownTier("gold".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid tier: gold");
    }

    #[test]
    fn test_context_chain_is_kept_in_message() {
        let err = anyhow::anyhow!("connection refused").context("Failed to send request");
        let api = ApiError::internal(err);
        assert_eq!(api.to_string(), "Failed to send request: connection refused");
    }
}
