//! # Chat completion client
//!
//! Thin client for an Azure-OpenAI style deployment endpoint. Each prompt is
//! sent as a single user message; no conversation history is kept.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::utils::logging::mask_token;

/// Anything that turns a prompt into a reply.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<String, ChatError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct ChatGptClient {
    client: reqwest::Client,
    config: ChatConfig,
}

impl std::fmt::Debug for ChatGptClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatGptClient")
            .field("base_url", &self.config.base_url)
            .field("model_name", &self.config.model_name)
            .field("api_version", &self.config.api_version)
            .field("access_token", &mask_token(&self.config.access_token))
            .finish()
    }
}

impl ChatGptClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// `<base>/deployments/<model>/chat/completions/?api-version=<version>`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/deployments/{}/chat/completions/?api-version={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model_name,
            self.config.api_version
        )
    }
}

#[async_trait]
impl ChatClient for ChatGptClient {
    async fn submit(&self, prompt: &str) -> Result<String, ChatError> {
        let request = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("api-key", &self.config.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Chat service returned {}: {}", status, body);
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChatError::MalformedResponse("no message content in choices".to_string()))
    }
}
