//! POST /chat — one conversational turn.

use std::sync::Arc;

use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use tracing::{info, instrument, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ChatReply},
    routes::chat::chat_request::ChatRequest,
};

pub const EMPTY_QUERY_REPLY: &str = "⚠️ Please enter a valid question.";

/// Handler: POST /chat
///
/// Always answers with `{"reply": "..."}`: 200 with the model's reply, 400
/// for a missing or blank query, 500 with `⚠️ Error: ...` when the turn fails.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"How do I reach Gangtok?"}'
/// ```
#[instrument(name = "chat_route", skip_all)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable chat body");
            ChatRequest::default()
        }
    };

    let Some(query) = body.query() else {
        return ChatReply::new(EMPTY_QUERY_REPLY).into_response_with_status(StatusCode::BAD_REQUEST);
    };

    let mut assistant = state.assistant.lock().await;
    let result = assistant.generate_response(query).await;
    state.record(&assistant);
    drop(assistant);

    match result {
        Ok(reply) => {
            info!(reply_len = reply.len(), "chat answered");
            ChatReply::new(reply).into_response_with_status(StatusCode::OK)
        }
        Err(e) => {
            warn!(error = %e, "chat failed");
            ChatReply::new(format!("⚠️ Error: {e}"))
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
