//! Remote chat-completion provider
//!
//! Works with any server that implements the OpenAI chat completions API
//! with structured output (`response_format: json_object`).
//!
//! # Configuration
//!
//! Environment variables:
//! - `INSIGHTFLOW_API_KEY`: Credential (required; blank or the demo
//!   placeholder counts as absent)
//! - `INSIGHTFLOW_API_HOST`: Base URL (default: https://api.openai.com)
//! - `INSIGHTFLOW_MODEL`: Model name (default: gpt-4o)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::validate_for_tier;
use crate::error::{Error, Result};
use crate::models::{AnalysisRequest, Insight};
use crate::prompts::{PromptId, PromptLibrary};

use super::parsing::parse_insight;
use super::{InsightProvider, PLACEHOLDER_CREDENTIAL};

/// Remote provider for the OpenAI `/v1/chat/completions` API
pub struct RemoteProvider {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl Clone for RemoteProvider {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            prompts: self.prompts.clone(),
        }
    }
}

impl RemoteProvider {
    /// Create a new remote provider
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            prompts: Arc::new(RwLock::new(PromptLibrary::new())),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            api_key: self.api_key.clone(),
            prompts: self.prompts.clone(),
        }
    }

    /// Create from environment variables
    ///
    /// Returns None when `INSIGHTFLOW_API_KEY` is unset, blank, or still
    /// the demo placeholder.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("INSIGHTFLOW_API_KEY").ok()?;
        if api_key.trim().is_empty() || api_key == PLACEHOLDER_CREDENTIAL {
            return None;
        }
        let host = std::env::var("INSIGHTFLOW_API_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let model = std::env::var("INSIGHTFLOW_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        Some(Self::new(&host, &model, &api_key))
    }

    /// Build the tier prompt for a request
    fn build_prompt(&self, request: &AnalysisRequest) -> Result<String> {
        let review_block = request.review_block();
        let mut prompts = self
            .prompts
            .write()
            .map_err(|_| Error::InvalidData("Failed to acquire prompt library lock".into()))?;
        let template = prompts.get(PromptId::for_tier(request.tier))?;
        let mut vars = HashMap::new();
        vars.insert("subject", request.subject.as_str());
        vars.insert("category", request.category.label());
        vars.insert("reviews", review_block.as_str());
        Ok(template.render_user(&vars))
    }

    /// Make a chat completion request
    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Completion API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::InvalidData("No choices in completion response".into()))
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Structured output selector
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// Chat completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Chat response message
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl InsightProvider for RemoteProvider {
    async fn request_insight(&self, request: &AnalysisRequest) -> Result<Insight> {
        let prompt = self.build_prompt(request)?;

        // Network failure, non-2xx, missing choices and parse failure all
        // collapse into a single AnalysisFailed at this boundary; no
        // retry, no partial result
        let response = self
            .chat_completion(&prompt)
            .await
            .map_err(|e| Error::AnalysisFailed(e.to_string()))?;
        debug!(subject = %request.subject, tier = %request.tier, "completion response: {}", response);

        let insight =
            parse_insight(&response).map_err(|e| Error::AnalysisFailed(e.to_string()))?;

        // A structurally valid but tier-incomplete payload is a contract
        // violation, not an analysis failure
        validate_for_tier(&insight, request.tier)?;
        Ok(insight)
    }

    async fn health_check(&self) -> bool {
        // Standard OpenAI model listing endpoint
        if let Ok(resp) = self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            if resp.status().is_success() {
                return true;
            }
        }

        // Some compatible servers only answer on the root endpoint
        if let Ok(resp) = self.http_client.get(&self.base_url).send().await {
            if resp.status().is_success() {
                return true;
            }
        }

        false
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Review, Tier};

    #[test]
    fn test_provider_new_trims_trailing_slash() {
        let provider = RemoteProvider::new("https://api.openai.com/", "gpt-4o", "sk-test");
        assert_eq!(provider.host(), "https://api.openai.com");
        assert_eq!(provider.model(), "gpt-4o");
    }

    #[test]
    fn test_from_env_rejects_placeholder() {
        std::env::set_var("INSIGHTFLOW_API_KEY", PLACEHOLDER_CREDENTIAL);
        assert!(RemoteProvider::from_env().is_none());
        std::env::remove_var("INSIGHTFLOW_API_KEY");
        assert!(RemoteProvider::from_env().is_none());
    }

    #[test]
    fn test_build_prompt_embeds_inputs() {
        let provider = RemoteProvider::new("https://api.openai.com", "gpt-4o", "sk-test");
        let request = AnalysisRequest::new(
            "연남동 카페",
            vec![Review::new(5, "커피 최고"), Review::new(2, "배송 지연")],
            Category::Store,
            Tier::Basic,
        )
        .unwrap();

        let prompt = provider.build_prompt(&request).unwrap();
        assert!(prompt.contains("연남동 카페"));
        assert!(prompt.contains("physical store"));
        assert!(prompt.contains("[rating 5] 커피 최고\n[rating 2] 배송 지연"));
        assert!(prompt.contains("popularItems"));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Analyze".to_string(),
            }],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Analyze");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "{\"sentimentScore\": 65}"
                },
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content,
            "{\"sentimentScore\": 65}"
        );
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let provider = RemoteProvider::new("http://127.0.0.1:1", "gpt-4o", "sk-test");
        assert!(!provider.health_check().await);
    }
}
