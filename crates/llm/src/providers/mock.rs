//! Deterministic mock provider.
//!
//! Used in tests and for offline dry runs of the pipeline. The mock either
//! returns a fixed canned answer or echoes a summary of the prompt it was
//! given, so callers can assert on what reached the generation step.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::Mutex;
use tributary_core::AppResult;

/// Mock LLM client.
pub struct MockClient {
    /// Canned answer; when `None` the mock echoes the prompt.
    canned: Option<String>,

    /// Prompts seen by this client, in call order.
    prompts: Mutex<Vec<LlmRequest>>,
}

impl MockClient {
    /// Create a mock that echoes the prompt back.
    pub fn new() -> Self {
        Self {
            canned: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns `answer`.
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            canned: Some(answer.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.prompts.lock().expect("mock lock poisoned").clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.prompts
            .lock()
            .expect("mock lock poisoned")
            .push(request.clone());

        let content = match &self.canned {
            Some(answer) => answer.clone(),
            None => format!("[mock:{}] {}", request.model, request.prompt),
        };

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_prompt() {
        let client = MockClient::new();
        let request = LlmRequest::new("what is up", "test-model");

        let response = client.complete(&request).await.unwrap();
        assert!(response.content.contains("what is up"));
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_canned_answer() {
        let client = MockClient::with_answer("fixed answer");
        let request = LlmRequest::new("anything", "test-model");

        let response = client.complete(&request).await.unwrap();
        assert_eq!(response.content, "fixed answer");
    }
}
