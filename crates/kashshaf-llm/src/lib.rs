//! Kashshaf Completion Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `kashshaf-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: Hosted chat-completions API
//!
//! # Examples
//!
//! ```
//! use kashshaf_llm::MockProvider;
//! use kashshaf_domain::{CompletionProvider, CompletionRequest};
//!
//! # async fn example() {
//! let provider = MockProvider::new("a | b | c | d");
//! let request = CompletionRequest {
//!     model: "gpt-4".to_string(),
//!     system_instruction: "system".to_string(),
//!     prompt: "prompt".to_string(),
//!     temperature: 0.2,
//! };
//! assert_eq!(provider.complete(&request).await.unwrap(), "a | b | c | d");
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use kashshaf_domain::{CompletionProvider, CompletionRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Missing, invalid or unauthorized credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from the completion service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls.
///
/// # Examples
///
/// ```
/// use kashshaf_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed reply for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific reply for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MockReply::Error);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The most recent request received, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn reply_for(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        let responses = self.responses.lock().unwrap();
        match responses.get(&request.prompt) {
            Some(MockReply::Text(text)) => Ok(text.clone()),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.reply_for(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4".to_string(),
            system_instruction: "system".to_string(),
            prompt: prompt.to_string(),
            temperature: 0.2,
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&request("any prompt")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete(&request("hello")).await.unwrap(), "world");
        assert_eq!(provider.complete(&request("foo")).await.unwrap(), "bar");
        assert_eq!(
            provider.complete(&request("unknown")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.complete(&request("prompt1")).await.unwrap();
        provider.complete(&request("prompt2")).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.complete(&request("bad prompt")).await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_records_last_request() {
        let provider = MockProvider::new("ok");
        assert!(provider.last_request().is_none());

        provider.complete(&request("the prompt")).await.unwrap();
        let last = provider.last_request().unwrap();
        assert_eq!(last.prompt, "the prompt");
        assert_eq!(last.model, "gpt-4");
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&request("test")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
