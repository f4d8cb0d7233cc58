use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{
        ChatRequest, ChatResponse, ClearContextRequest, ClearContextResponse, SessionInfoResponse,
    },
    services::session_manager::MessageRole,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.ensure_session(s).await,
        _ => state.sessions.create_session().await,
    };

    state.sessions.append_message(&session_id, MessageRole::User, trimmed).await;
    let context = state.sessions.get_context(&session_id).await;

    let reply = state.responder.reply(&context).await?;
    state
        .sessions
        .append_message(&session_id, MessageRole::Assistant, reply.text.as_str())
        .await;
    tracing::debug!(%session_id, turns = context.len(), "chat reply produced");

    Ok(Json(ChatResponse::reply(session_id, reply.text, reply.ref_info)))
}

pub async fn clear_context_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ClearContextRequest>,
) -> Json<ClearContextResponse> {
    if let Some(session_id) = payload.session_id.as_deref().filter(|s| !s.is_empty()) {
        let removed = state.sessions.remove_session(session_id).await;
        tracing::info!(session_id, removed, "context cleared");
    }
    Json(ClearContextResponse { success: Some(true), error: None })
}

pub async fn session_info_handler(State(state): State<SharedState>) -> Json<SessionInfoResponse> {
    Json(SessionInfoResponse {
        session_count: state.sessions.len().await,
        success: true,
    })
}
