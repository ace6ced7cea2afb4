//! Conversation history

use axum::{
    extract::{Path, Query, State},
    Json,
};
use estate_core::domain::{Conversation, ConversationThread};
use estate_shared::utils::parse_entity_id;

use crate::dto::ConversationQuery;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/conversations?participantId=[&with=]
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<ApiResponse<Vec<Conversation>>>, ApiError> {
    let conversations = match query.with.as_deref() {
        Some(other) => state
            .gateway
            .conversation_between(&query.participant_id, other)
            .await?
            .into_iter()
            .collect(),
        None => state.gateway.conversations_for(&query.participant_id).await?,
    };
    Ok(Json(ApiResponse::success(conversations)))
}

/// GET /api/v1/conversations/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ConversationThread>>, ApiError> {
    let id = parse_entity_id(&id).ok_or_else(|| ApiError::BadRequest(format!("Invalid conversation id: {}", id)))?;
    let thread = state.gateway.thread(&id).await?;
    Ok(Json(ApiResponse::success(thread)))
}
