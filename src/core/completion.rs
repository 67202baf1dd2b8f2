//! Chat completion with bounded retry.
//!
//! Each attempt's reply is classified by [`classify`] into success, retry
//! after a delay, or a terminal failure. Only 429 and 5xx are retried.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::core::models::request::Credential;
use crate::core::models::usage::TokenUsage;
use crate::core::providers::openrouter::{ChatRequest, ChatResponse};
use crate::core::providers::transport::{HttpReply, Transport, TransportError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(5);

/// Longest slice of an error body kept in messages.
const MAX_BODY_IN_ERROR: usize = 500;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Invalid OpenRouter API key. Get your key at https://openrouter.ai/keys")]
    InvalidCredential,
    #[error("Failed after {attempts} attempts: HTTP {status}: {body}")]
    RetriesExhausted {
        attempts: u32,
        status: u16,
        body: String,
    },
    #[error("API error on attempt {attempt}: HTTP {status}: {body}")]
    Api { attempt: u32, status: u16, body: String },
    #[error("Request failed on attempt {attempt}: {source}")]
    Transport {
        attempt: u32,
        #[source]
        source: TransportError,
    },
    #[error("Malformed API response on attempt {attempt}: {reason}")]
    MalformedResponse { attempt: u32, reason: String },
}

/// Generated text plus what the API reported about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
    /// Model that served the request, as reported by the API.
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    RateLimited,
    ServerError(u16),
}

/// What to do after one attempt.
#[derive(Debug)]
pub enum Outcome {
    Success(Completion),
    Retry { delay: Duration, reason: RetryReason },
    Fatal(CompletionError),
}

/// Parse the leading whole seconds of a `Retry-After` value, so `1.5`
/// waits one second.
///
/// HTTP-date values and garbage fall back to the default delay.
pub fn retry_after_delay(header: Option<&str>) -> Duration {
    header
        .map(|v| {
            let v = v.trim();
            let digits = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
            &v[..digits]
        })
        .and_then(|secs| secs.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RATE_LIMIT_DELAY)
}

/// Exponential backoff for server errors: 2^attempt seconds.
pub fn server_error_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

fn parse_success(body: &str, attempt: u32) -> Outcome {
    let response: ChatResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            return Outcome::Fatal(CompletionError::MalformedResponse {
                attempt,
                reason: e.to_string(),
            })
        }
    };

    let Some(text) = response.first_content() else {
        return Outcome::Fatal(CompletionError::MalformedResponse {
            attempt,
            reason: "response contained no message content".to_string(),
        });
    };

    let usage = response.usage().unwrap_or_else(|| {
        warn!("Response carried no token usage; assuming zero");
        TokenUsage::default()
    });

    Outcome::Success(Completion {
        text: text.to_string(),
        usage,
        model: response.model().map(str::to_string),
    })
}

/// Decide what to do with the reply to attempt `attempt` (1-based).
///
/// Never returns `Retry` once `attempt >= max_attempts`.
pub fn classify(reply: &HttpReply, attempt: u32, max_attempts: u32) -> Outcome {
    let attempts_left = attempt < max_attempts;
    match reply.status {
        200..=299 => parse_success(&reply.body, attempt),
        401 => Outcome::Fatal(CompletionError::InvalidCredential),
        429 | 500..=599 if attempts_left => {
            if reply.status == 429 {
                Outcome::Retry {
                    delay: retry_after_delay(reply.retry_after.as_deref()),
                    reason: RetryReason::RateLimited,
                }
            } else {
                Outcome::Retry {
                    delay: server_error_delay(attempt),
                    reason: RetryReason::ServerError(reply.status),
                }
            }
        }
        429 | 500..=599 => Outcome::Fatal(CompletionError::RetriesExhausted {
            attempts: attempt,
            status: reply.status,
            body: truncate_body(&reply.body),
        }),
        status => Outcome::Fatal(CompletionError::Api {
            attempt,
            status,
            body: truncate_body(&reply.body),
        }),
    }
}

/// Chat-completion client that masks transient failures behind retries.
pub struct CompletionClient<T> {
    transport: T,
    max_attempts: u32,
}

impl<T: Transport> CompletionClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// `max_attempts` counts the first try; values below 1 are raised to 1.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Generate a completion for `prompt` with `model`.
    pub async fn complete(
        &self,
        prompt: &str,
        model: &str,
        credential: &Credential,
    ) -> Result<Completion, CompletionError> {
        let request = ChatRequest::blog_post(prompt, model);
        let max = self.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!("Sending completion request (attempt {}/{})", attempt, max);

            let outcome = match self.transport.send(&request, credential).await {
                Ok(reply) => {
                    let outcome = classify(&reply, attempt, max);
                    if matches!(outcome, Outcome::Fatal(_)) && reply.status >= 400 {
                        error!(
                            "API response (HTTP {}): {}",
                            reply.status,
                            truncate_body(&reply.body)
                        );
                    }
                    outcome
                }
                Err(source) => Outcome::Fatal(CompletionError::Transport { attempt, source }),
            };

            match outcome {
                Outcome::Success(completion) => return Ok(completion),
                Outcome::Retry { delay, reason } => {
                    match reason {
                        RetryReason::RateLimited => warn!(
                            "Rate limited. Waiting {}s before retry {}/{}...",
                            delay.as_secs(),
                            attempt,
                            max
                        ),
                        RetryReason::ServerError(status) => warn!(
                            "Server error (HTTP {}). Retrying in {}ms (attempt {}/{})...",
                            status,
                            delay.as_millis(),
                            attempt,
                            max
                        ),
                    }
                    tokio::time::sleep(delay).await;
                }
                Outcome::Fatal(err) => return Err(err),
            }
        }
    }
}
