//! Azure OpenAI chat completion client
//!
//! - Endpoint: POST {endpoint}/openai/deployments/{model}/chat/completions
//! - Auth: `api-key` header
//! - Non-streaming; the first choice is the reply

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cli::config::{CompletionConfig, HttpConfig};
use crate::completion::CompletionCapability;
use crate::errors::{RagError, Result};
use crate::http;
use crate::types::ChatTurn;

/// Default REST API version
pub const DEFAULT_COMPLETION_API_VERSION: &str = "2024-06-01";

/// Azure OpenAI chat completion client
#[derive(Debug, Clone)]
pub struct AzureChatClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model_id: String,
    api_version: String,
}

impl AzureChatClient {
    /// Create client with the default API version and timeout
    pub fn new(model_id: &str, endpoint: &str, api_key: &str) -> Result<Self> {
        Self::with_config(
            model_id,
            endpoint,
            api_key,
            DEFAULT_COMPLETION_API_VERSION,
            http::DEFAULT_TIMEOUT,
        )
    }

    /// Create client with custom configuration
    pub fn with_config(
        model_id: &str,
        endpoint: &str,
        api_key: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let model_id = http::require(model_id, "completion.model_id")?;
        let endpoint = http::parse_endpoint(endpoint, "completion.endpoint")?;
        let api_key = http::require(api_key, "completion.api_key")?;

        Ok(Self {
            client: http::build_client(timeout)?,
            endpoint,
            api_key,
            model_id,
            api_version: api_version.to_string(),
        })
    }

    pub fn from_config(completion: &CompletionConfig, http_config: &HttpConfig) -> Result<Self> {
        Self::with_config(
            &completion.model_id,
            &completion.endpoint,
            &completion.api_key,
            &completion.api_version,
            Duration::from_secs(http_config.timeout_secs),
        )
    }

    /// Get current model name
    pub fn model(&self) -> &str {
        &self.model_id
    }

    /// Get endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionCapability for AzureChatClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<ChatTurn> {
        let url = http::endpoint_url(
            &self.endpoint,
            &["openai", "deployments", self.model_id.as_str(), "chat", "completions"],
        )?;
        tracing::debug!(model = %self.model_id, turns = turns.len(), "sending completion request");

        let response = self
            .client
            .post(url)
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&CompletionRequest { messages: turns })
            .send()
            .await
            .map_err(|e| {
                RagError::CompletionServiceFailure(format!("Failed to send request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::CompletionServiceFailure(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            RagError::CompletionServiceFailure(format!("Failed to parse response: {}", e))
        })?;

        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| {
                RagError::CompletionServiceFailure("Response contained no choices".to_string())
            })?;

        Ok(ChatTurn::assistant(message.content.unwrap_or_default()))
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatTurn],
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Reply message; content is null for filtered replies
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
