//! Axum router configuration with middleware.
//!
//! Question routes live under `/api/v1/`; `/` and `/health` are probes.
//! Middleware: CORS (any origin), request tracing.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route("/ask", post(handlers::ask::ask_question));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/", get(root))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Service banner.
async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": state.settings.api_title,
        "version": state.settings.api_version,
        "status": "running",
    }))
}

/// GET /health - Liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use iscoolgpt_core::llm::box_provider::BoxLlmProvider;
    use iscoolgpt_infra::llm::LlmDispatcher;
    use iscoolgpt_infra::llm::mock::{MOCK_MODEL, MockProvider};
    use iscoolgpt_types::config::Settings;

    use super::*;

    fn app(settings: Settings) -> Router {
        let settings = Arc::new(settings);
        let dispatcher = LlmDispatcher::new(settings.clone())
            .unwrap()
            .with_mock(MockProvider::new().with_latency(Duration::ZERO));
        build_router(AppState::from_parts(settings, BoxLlmProvider::new(dispatcher)))
    }

    fn with_provider(provider: &str) -> Settings {
        let mut settings = Settings::default();
        settings.llm.provider = provider.to_string();
        settings
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn ask_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let (status, body) = send(app(Settings::default()), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "IsCoolGPT API", "version": "1.0.0", "status": "running"})
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(Settings::default()), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_ask_with_mock_provider() {
        let (status, body) = send(
            app(Settings::default()),
            ask_request(json!({"question": "What is Docker?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"], "What is Docker?");
        assert!(body["answer"].as_str().unwrap().contains("Docker"));
        assert_eq!(body["model"], MOCK_MODEL);
        assert!(body["tokens_used"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_ask_with_context_and_budget() {
        let (status, body) = send(
            app(Settings::default()),
            ask_request(json!({
                "question": "What is Python?",
                "context": "first week",
                "max_tokens": 8,
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let answer = body["answer"].as_str().unwrap();
        assert!(answer.starts_with("[Context: first week]"));
        assert!(answer.ends_with("..."));
    }

    #[tokio::test]
    async fn test_ask_missing_question_is_422() {
        let (status, body) = send(app(Settings::default()), ask_request(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_ask_empty_question_is_422() {
        let (status, _) = send(
            app(Settings::default()),
            ask_request(json!({"question": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_ask_too_long_question_is_422() {
        let (status, _) = send(
            app(Settings::default()),
            ask_request(json!({"question": "a".repeat(2001)})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_ask_malformed_json_is_422() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(Settings::default()), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ask_unsupported_provider_is_400() {
        let (status, body) = send(
            app(with_provider("invalid_provider")),
            ask_request(json!({"question": "test question"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "UNSUPPORTED_PROVIDER");
        assert!(
            body["errors"][0]["message"]
                .as_str()
                .unwrap()
                .contains("invalid_provider")
        );
    }

    #[tokio::test]
    async fn test_ask_missing_api_key_is_400() {
        let (status, body) = send(
            app(with_provider("openai")),
            ask_request(json!({"question": "test question"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["code"], "MISSING_API_KEY");
    }

    #[tokio::test]
    async fn test_ask_provider_call_failure_is_500() {
        // Nothing listens on port 1.
        let mut settings = with_provider("huggingface");
        settings.llm.huggingface.api_key = Some(SecretString::from("hf-test".to_string()));
        settings.llm.huggingface.api_url = Some("http://127.0.0.1:1".to_string());

        let (status, body) = send(
            app(settings),
            ask_request(json!({"question": "test question"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errors"][0]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app(Settings::default()).oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
