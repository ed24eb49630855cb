//! Chatbot screen REST endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chamapay_chats::{ChatEntry, ConversationController};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::GatewayState;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryResponse {
    pub id: u64,
    /// `user` or `bot`
    pub from: String,
    pub text: String,
}

impl From<&ChatEntry> for EntryResponse {
    fn from(entry: &ChatEntry) -> Self {
        Self {
            id: entry.id(),
            from: entry.origin().as_str().to_string(),
            text: entry.text().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: String,
    pub reply_delay_ms: u64,
    pub entries: Vec<EntryResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitMessageResponse {
    /// False when the text was blank and nothing was appended
    pub accepted: bool,
    pub entries: Vec<EntryResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CloseSessionResponse {
    pub id: String,
    pub cancelled_replies: usize,
}

pub(crate) fn entry_responses(entries: &[ChatEntry]) -> Vec<EntryResponse> {
    entries.iter().map(EntryResponse::from).collect()
}

async fn session_response(controller: &ConversationController) -> SessionResponse {
    SessionResponse {
        id: controller.id().to_string(),
        reply_delay_ms: u64::try_from(controller.reply_delay().as_millis()).unwrap_or(u64::MAX),
        entries: entry_responses(&controller.entries().await),
    }
}

/// Create chat routes
pub fn create_chat_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/chat/sessions", post(open_session))
        .route(
            "/api/chat/sessions/:session_id",
            get(get_session).delete(close_session),
        )
        .route("/api/chat/sessions/:session_id/messages", post(submit_message))
}

#[utoipa::path(
    post,
    path = "/api/chat/sessions",
    tag = "Chat",
    responses(
        (status = 201, description = "Chat screen opened with its seed messages", body = SessionResponse)
    )
)]
pub async fn open_session(
    State(state): State<Arc<GatewayState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let controller = state.sessions.open().await;
    (StatusCode::CREATED, Json(session_response(&controller).await))
}

#[utoipa::path(
    get,
    path = "/api/chat/sessions/{session_id}",
    tag = "Chat",
    params(
        ("session_id" = String, Path, description = "Chat session id")
    ),
    responses(
        (status = 200, description = "Current conversation", body = SessionResponse),
        (status = 400, description = "Malformed session id", body = crate::error::ErrorResponse),
        (status = 404, description = "Session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_session(
    ApiPath(session_id): ApiPath<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<SessionResponse>> {
    let controller = state.sessions.get_by_str(&session_id).await?;
    Ok(Json(session_response(&controller).await))
}

#[utoipa::path(
    post,
    path = "/api/chat/sessions/{session_id}/messages",
    tag = "Chat",
    params(
        ("session_id" = String, Path, description = "Chat session id")
    ),
    request_body = SubmitMessageRequest,
    responses(
        (status = 200, description = "Submission handled; the bot reply follows after the delay", body = SubmitMessageResponse),
        (status = 400, description = "Malformed session id or request body", body = crate::error::ErrorResponse),
        (status = 404, description = "Session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_message(
    ApiPath(session_id): ApiPath<String>,
    State(state): State<Arc<GatewayState>>,
    ApiJson(request): ApiJson<SubmitMessageRequest>,
) -> GatewayResult<Json<SubmitMessageResponse>> {
    let controller = state.sessions.get_by_str(&session_id).await?;
    let accepted = controller.submit(&request.text).await.is_some();

    Ok(Json(SubmitMessageResponse {
        accepted,
        entries: entry_responses(&controller.entries().await),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/chat/sessions/{session_id}",
    tag = "Chat",
    params(
        ("session_id" = String, Path, description = "Chat session id")
    ),
    responses(
        (status = 200, description = "Screen closed and pending replies cancelled", body = CloseSessionResponse),
        (status = 400, description = "Malformed session id", body = crate::error::ErrorResponse),
        (status = 404, description = "Session not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn close_session(
    ApiPath(session_id): ApiPath<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<CloseSessionResponse>> {
    let id = chamapay_chats::services::session_service::parse_session_id(&session_id)?;
    let cancelled_replies = state.sessions.close(&id).await?;

    info!(%id, cancelled_replies, "chat screen closed");
    Ok(Json(CloseSessionResponse {
        id: id.to_string(),
        cancelled_replies,
    }))
}
