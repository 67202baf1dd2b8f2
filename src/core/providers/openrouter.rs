use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::models::request::Credential;
use crate::core::models::usage::TokenUsage;
use crate::core::providers::transport::{HttpReply, Transport, TransportError};

pub const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const KEYS_URL: &str = "https://openrouter.ai/keys";

pub const DEFAULT_REFERER: &str = "https://github.com/j0nl1/blogsmith";
pub const DEFAULT_TITLE: &str = "blogsmith";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const SYSTEM_PROMPT: &str = "You are an expert content writer and SEO specialist. \
Create engaging, well-researched blog posts that provide real value to readers. \
Always return valid JSON.";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

impl ChatRequest {
    /// Blog-writer request for `prompt`, asking for a JSON object back.
    pub fn blog_post(prompt: &str, model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<TokenUsage>,
    model: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }

    pub fn usage(&self) -> Option<TokenUsage> {
        self.usage
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// Application identification sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct AppIdentity {
    pub referer: String,
    pub title: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// reqwest-backed transport for the OpenRouter chat-completion endpoint.
pub struct OpenRouterTransport {
    client: reqwest::Client,
    endpoint: String,
    identity: AppIdentity,
    timeout: Duration,
}

impl OpenRouterTransport {
    pub fn new(
        endpoint: impl Into<String>,
        identity: AppIdentity,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            identity,
            timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout.as_secs())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for OpenRouterTransport {
    async fn send(
        &self,
        request: &ChatRequest,
        credential: &Credential,
    ) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", credential.expose()))
            .header("HTTP-Referer", &self.identity.referer)
            .header("X-Title", &self.identity.title)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string());
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(HttpReply {
            status,
            retry_after,
            body,
        })
    }
}
