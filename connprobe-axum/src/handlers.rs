//! Handlers for `/hello`.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::ApiResult;
use crate::state::AppState;

/// Body returned after a successful probe.
pub const CONNECTED_MESSAGE: &str = "Connected to the database!";

/// Body returned by the health check.
pub const HELLO_MESSAGE: &str = "Hello, World!";

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

/// Serialize `body` as a JSON response with an explicit UTF-8 charset.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
            response
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /hello`
pub async fn hello() -> Response {
    json_response(StatusCode::OK, &MessageBody { message: HELLO_MESSAGE })
}

/// `POST /hello`
///
/// The body is read as raw bytes so that a missing or unusual content type
/// still reaches the descriptor parser.
pub async fn validate(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    debug!(bytes = body.len(), "Received JSON data");
    let connected = state.validator().validate(&body).await?;
    debug!(driver = connected.driver, "Probe succeeded");
    Ok(json_response(StatusCode::OK, &MessageBody { message: CONNECTED_MESSAGE }))
}

/// `OPTIONS /hello` outside of a CORS preflight.
pub async fn options() -> StatusCode {
    StatusCode::OK
}
