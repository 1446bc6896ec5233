//! Question answering handler for the REST API.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use iscoolgpt_types::ask::{AskRequest, AskResponse};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/v1/ask - Answer a programming or cloud question.
pub async fn ask_question(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let Json(request) = payload?;
    let start = Instant::now();

    let response = state.answer_service.ask(&request).await?;

    tracing::info!(
        provider = state.answer_service.provider_name(),
        model = ?response.model,
        tokens_used = ?response.tokens_used,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "question answered"
    );

    Ok(Json(response))
}
