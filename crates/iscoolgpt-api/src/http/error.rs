//! Application error type mapping to HTTP status codes and the error body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use iscoolgpt_core::service::answer::AnswerError;
use iscoolgpt_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed to parse or validate.
    Validation(String),
    /// LLM selection or call failure.
    Llm(LlmError),
}

impl From<AnswerError> for AppError {
    fn from(e: AnswerError) -> Self {
        match e {
            AnswerError::Validation(e) => AppError::Validation(e.to_string()),
            AnswerError::Llm(e) => AppError::Llm(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::Llm(e) => {
                let code = match e {
                    LlmError::UnsupportedProvider(_) => "UNSUPPORTED_PROVIDER",
                    LlmError::MissingCredential { .. } => "MISSING_API_KEY",
                    LlmError::ProviderCall { .. } => "LLM_ERROR",
                };
                if e.is_configuration_fault() {
                    (StatusCode::BAD_REQUEST, code, e.to_string())
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        code,
                        format!("internal error: {e}"),
                    )
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
