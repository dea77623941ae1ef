//! Mock LLM Service Implementation
//!
//! Used by `LlmServiceFactory` when provider is `"mock"`. Scripted
//! responses are served first, in order; once exhausted it answers
//! deterministically from the prompt. Every prompt is recorded.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{Completion, LlmError, LlmService};

pub const MOCK_MODEL: &str = "mock-model";

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    scripted: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_response(&self, text: impl Into<String>) {
        self.scripted.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failed call
    pub fn push_failure(&self, message: impl Into<String>) {
        self.scripted.lock().unwrap().push_back(Err(message.into()));
    }

    /// Prompts received so far
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Clear scripted responses and history
    pub fn reset(&self) {
        self.scripted.lock().unwrap().clear();
        self.prompts.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn generate(&self, prompt: &str) -> Result<Completion, LlmError> {
        tracing::info!("Mock LLM service processing generation request");
        self.prompts.lock().unwrap().push(prompt.to_string());

        let scripted = self.scripted.lock().unwrap().pop_front();
        let text = match scripted {
            Some(Ok(text)) => text,
            Some(Err(message)) => return Err(LlmError::Response(message)),
            None => {
                let topic = prompt.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                format!("Mock response to: {}", topic.trim())
            }
        };

        Ok(Completion {
            text,
            model: MOCK_MODEL.to_string(),
        })
    }

    fn model(&self) -> &str {
        MOCK_MODEL
    }
}
