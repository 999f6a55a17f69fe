//! POST /feedback — store a user's preferred answer as new knowledge.

use std::sync::Arc;

use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::feedback::feedback_request::{FeedbackRequest, FeedbackResponse},
};

/// Handler: POST /feedback
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/feedback \
///   -H 'content-type: application/json' \
///   -d '{"question":"What to pack?","answer":"...","feedback":{"useful":true,"preferred_answer":"Warm layers."}}'
/// ```
#[instrument(name = "feedback_route", skip_all)]
pub async fn feedback(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(body) = body?;

    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }

    let mut assistant = state.assistant.lock().await;
    let result = assistant
        .feedback_loop(question, &body.answer, &body.feedback)
        .await;
    state.record(&assistant);
    drop(assistant);
    let entry = result?;

    info!(accepted = entry.is_some(), "feedback processed");
    Ok(ApiResponse::success(FeedbackResponse {
        accepted: entry.is_some(),
        entry,
    })
    .into_response_with_status(StatusCode::OK))
}
