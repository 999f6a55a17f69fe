//! GET /health — liveness plus a few counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub knowledge_entries: usize,
    pub history_turns: usize,
    pub provider: String,
    pub model: String,
}

/// Handler: GET /health
///
/// Reads counters kept on [`AppState`], so it answers even while a chat
/// request holds the assistant.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let counts = state.counts();
    ApiResponse::success(HealthResponse {
        status: "ok",
        knowledge_entries: counts.knowledge_entries,
        history_turns: counts.history_turns,
        provider: state.llm_provider.clone(),
        model: state.llm_model.clone(),
    })
    .into_response_with_status(StatusCode::OK)
}
