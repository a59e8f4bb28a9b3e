//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

/// Wrapper turning crate errors into HTTP responses.
///
/// Validation failures map to 400, storage failures to 500; both carry a JSON
/// body of the form `{"error": "..."}` with the bare error message.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Storage(msg) => {
                tracing::error!(error = %msg, "request failed on storage");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
