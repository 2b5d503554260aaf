//! Test utilities for insightflow-core
//!
//! This module provides testing infrastructure including a mock chat
//! completion server that can be used for development and integration
//! tests against the remote provider.

use axum::{
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::models::Category;
use crate::provider::StubProvider;

/// Mock chat completion server for testing and development
///
/// Speaks just enough of the OpenAI chat completions API for the remote
/// provider: `POST /v1/chat/completions` and `GET /v1/models`. The
/// response is steered by the requested model name:
/// - `fail-http`: responds 500
/// - `fail-garbage`: responds with non-JSON message content
/// - `fail-basic-only`: responds with a basic-shape payload (tier
///   violation for trend/consulting requests)
/// - anything else: the canned insight for the category detected in the
///   prompt
pub struct MockCompletionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCompletionServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat_completion));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Model listing endpoint (health check)
async fn handle_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        data: vec![ModelInfo {
            id: "gpt-4o".to_string(),
            object: "model".to_string(),
        }],
    })
}

/// Chat completion endpoint
///
/// Requires a Bearer credential like the real API does, so tests catch
/// a provider that forgets the Authorization header.
async fn handle_chat_completion(
    headers: HeaderMap,
    Json(request): Json<ChatCompletionRequest>,
) -> axum::response::Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|auth| auth.starts_with("Bearer "));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing bearer credential").into_response();
    }

    match request.model.as_str() {
        "fail-http" => (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded").into_response(),
        "fail-garbage" => Json(completion("I could not produce JSON for that.")).into_response(),
        "fail-basic-only" => {
            let body = r#"{"popularItems": ["시그니처 라떼"], "strengths": ["커피 향"],
                "risks": ["대기 시간"], "sentimentScore": 65, "urgentIssue": ""}"#;
            Json(completion(body)).into_response()
        }
        _ => {
            let prompt = request
                .messages
                .first()
                .map(|m| m.content.as_str())
                .unwrap_or_default();
            let category = detect_category(prompt);
            let insight = StubProvider::canned_insight(category);
            let body = serde_json::to_string(&insight).unwrap();
            Json(completion(&body)).into_response()
        }
    }
}

/// Category detection from the prompt text, matching the labels the
/// prompt templates embed
fn detect_category(prompt: &str) -> Category {
    if prompt.contains("online mall listing") {
        Category::Mall
    } else {
        Category::Store
    }
}

fn completion(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![ChatChoice {
            message: ChatResponseMessage {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
        }],
    }
}

// Request/Response types for the mock server

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatRequestMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatRequestMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Serialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Serialize)]
struct ChatResponseMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    data: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    id: String,
    object: String,
}
