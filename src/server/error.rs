//! Mapping of check-in failures onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::checkin::CheckinError;

/// Handler error rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub CheckinError);

impl From<CheckinError> for ApiError {
    fn from(e: CheckinError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            e if e.is_not_found() => {
                tracing::info!("{e}");
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "detail": "Session not found" })),
                )
                    .into_response()
            }
            CheckinError::Delivery(e) => {
                tracing::error!("{e}");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": "Webhook delivery failed",
                        "message": e.message,
                        "summary": e.summary,
                    })),
                )
                    .into_response()
            }
            e => {
                tracing::error!("General error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
