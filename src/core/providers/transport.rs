use async_trait::async_trait;
use thiserror::Error;

use crate::core::models::request::Credential;
use crate::core::providers::openrouter::ChatRequest;

/// An HTTP reply before any status interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    /// Raw `Retry-After` header value, if present.
    pub retry_after: Option<String>,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Network error: {0}")]
    Network(String),
}

/// Sends one chat-completion request and returns whatever came back.
///
/// Implementations must not retry; retry policy lives in
/// [`crate::core::completion::CompletionClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: &ChatRequest,
        credential: &Credential,
    ) -> Result<HttpReply, TransportError>;
}

/// Endpoint overrides must be HTTPS; the API key travels in a header.
pub fn validate_endpoint(url: &str) -> Result<(), String> {
    if !url.starts_with("https://") {
        return Err(format!("endpoint must use HTTPS, got: {}", url));
    }
    Ok(())
}
