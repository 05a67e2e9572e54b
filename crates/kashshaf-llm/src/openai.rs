//! OpenAI Provider Implementation
//!
//! Sends one chat-completion request per call to an OpenAI-compatible
//! endpoint.
//!
//! # Features
//!
//! - Async HTTP communication with the chat-completions API
//! - Configurable endpoint and timeout
//! - One attempt per call; failures surface to the caller unchanged
//!
//! # Examples
//!
//! ```no_run
//! use kashshaf_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...")
//!     .with_endpoint("https://api.openai.com/v1");
//! ```

use crate::LlmError;
use kashshaf_domain::{CompletionProvider, CompletionRequest};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default timeout for completion requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Chat-completions API provider
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider for the default endpoint
    ///
    /// # Parameters
    ///
    /// - `api_key`: bearer credential for the service
    pub fn new(api_key: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            client: build_client(timeout),
            timeout,
        }
    }

    /// Use a different OpenAI-compatible base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_client(timeout);
        self
    }

    /// The configured base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one chat-completion request
    ///
    /// # Returns
    ///
    /// The trimmed content of the first choice
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The credential is empty or rejected
    /// - The model is unknown to the service
    /// - The quota or rate limit is exhausted
    /// - Network communication fails
    /// - The reply has no choices or no content
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key is empty".to_string()));
        }

        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatCompletionRequest::from_request(request);

        debug!(
            "POST {} (model {}, prompt {} chars, timeout {:?})",
            url,
            request.model,
            request.prompt.chars().count(),
            self.timeout
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(error_for_status(status, error_text, &request.model));
        }

        let reply: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_choice_text(reply)
    }
}

impl CompletionProvider for OpenAiProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request).await
    }
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
        }
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

fn error_for_status(status: StatusCode, body: String, model: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

fn first_choice_text(reply: ChatCompletionResponse) -> Result<String, LlmError> {
    reply
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices returned".to_string()))?
        .message
        .content
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("First choice has no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4".to_string(),
            system_instruction: "You are precise.".to_string(),
            prompt: "Analyse this".to_string(),
            temperature: 0.2,
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("sk-test");
        assert_eq!(provider.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(provider.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_endpoint_strips_trailing_slash() {
        let provider = OpenAiProvider::new("sk-test").with_endpoint("http://localhost:8000/v1/");
        assert_eq!(provider.endpoint(), "http://localhost:8000/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let request = request();
        let body = serde_json::to_value(ChatCompletionRequest::from_request(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are precise.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Analyse this");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_first_choice_is_trimmed() {
        let reply: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [
                {"message": {"role": "assistant", "content": "\n a | b | c | d \n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(reply).unwrap(), "a | b | c | d");
    }

    #[test]
    fn test_no_choices() {
        let reply: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(first_choice_text(reply), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_null_content() {
        let reply: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(first_choice_text(reply), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, "bad key".into(), "gpt-4"),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, String::new(), "gpt-4"),
            LlmError::ModelNotAvailable(m) if m == "gpt-4"
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, String::new(), "gpt-4"),
            LlmError::RateLimitExceeded
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, "upstream".into(), "gpt-4"),
            LlmError::Communication(msg) if msg.contains("upstream")
        ));
    }

    #[tokio::test]
    async fn test_empty_key_rejected_before_request() {
        let provider = OpenAiProvider::new("  ");
        let result = provider.chat(&request()).await;
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = OpenAiProvider::new("sk-test")
            .with_endpoint("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));

        let result = provider.complete(&request()).await;
        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }

    // Requires a real credential in OPENAI_API_KEY
    #[tokio::test]
    #[ignore]
    async fn test_openai_integration() {
        let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let provider = OpenAiProvider::new(key);
        let result = provider.chat(&request()).await;
        if let Ok(reply) = result {
            assert!(!reply.is_empty());
        }
    }
}
