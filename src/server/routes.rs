//! HTTP route handlers for the check-in API.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::{ServeDir, ServeFile};

use crate::checkin::SummaryRecord;

use super::error::ApiError;
use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.static_dir.clone();
    Router::new()
        .route("/health", get(health_check))
        .route("/chat/start", post(start_chat))
        .route("/chat/message", post(send_message))
        .route("/chat/submit", post(submit_chat))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "checkin-agent",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.service.store().len(),
    }))
}

/// Request addressing a session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Caller-chosen session identifier.
    pub session_id: String,
}

/// Request carrying a user message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    /// Caller-chosen session identifier.
    pub session_id: String,
    /// The user's message.
    pub message: String,
}

/// Assistant reply.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    /// Always `success`.
    pub status: &'static str,
    /// The assistant's message.
    pub message: String,
}

/// Submission result.
#[derive(Debug, Serialize)]
pub struct SubmitReply {
    /// Always `success`.
    pub status: &'static str,
    /// The delivered summary.
    pub summary: SummaryRecord,
    /// Always `delivered`.
    pub webhook_status: &'static str,
}

async fn start_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let message = state.service.start(&request.session_id).await?;
    Ok(Json(ChatReply {
        status: "success",
        message,
    }))
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let message = state
        .service
        .message(&request.session_id, &request.message)
        .await?;
    Ok(Json(ChatReply {
        status: "success",
        message,
    }))
}

async fn submit_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SubmitReply>, ApiError> {
    let outcome = state.service.submit(&request.session_id).await?;
    Ok(Json(SubmitReply {
        status: "success",
        summary: outcome.summary,
        webhook_status: "delivered",
    }))
}
