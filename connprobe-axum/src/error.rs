//! Mapping probe failures onto HTTP responses.

use axum::response::{IntoResponse, Response};
use connprobe_core::ConnectionError;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::handlers::json_response;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A request that could not be validated.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ConnectionError);

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// `400` for problems with the request, `502` when the database refused.
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        debug!(status = status.as_u16(), kind = self.0.kind(), "Request failed");
        json_response(status, &ErrorBody { error: &message })
    }
}
