use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    errors::{AppError, Result},
    models::ChatRequest,
    state::AppState,
};

const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Process one chat turn for a session
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse> {
    if payload.session_id.trim().is_empty() {
        return Err(AppError::Validation(
            "El session_id no puede estar vacío".to_string(),
        ));
    }
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation(
            "El mensaje no puede estar vacío".to_string(),
        ));
    }

    let response = state.chat.process_message(payload).await?;
    Ok(Json(response))
}

/// A session's message history, oldest first
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = state.chat.session_history(&session_id, Some(limit)).await?;
    Ok(Json(history))
}

/// Drop a session's history; unknown sessions report zero deletions
pub async fn delete_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse> {
    let deleted = state.chat.clear_session(&session_id).await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
