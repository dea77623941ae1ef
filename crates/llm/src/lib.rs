//! Scriptly LLM Service
//!
//! Text generation used by the blog pipeline:
//! - Google Gemini (`generateContent`) for production
//! - Mock service with scripted responses for testing and development

use std::sync::Arc;

use thiserror::Error;

pub mod gemini;
pub mod mock;

/// Model used when `GEMINI_MODEL` is not set
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,
}

impl From<LlmError> for scriptly_common::Error {
    fn from(err: LlmError) -> Self {
        scriptly_common::Error::Generation(err.to_string())
    }
}

/// Generated text and the model that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

/// LLM service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider (gemini, mock)
    pub provider: String,
    pub api_key: String,
    pub model: String,
    /// Override for the API host (proxies, tests)
    pub base_url: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LlmConfig {
    /// Create LLM config from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("GEMINI_BASE_URL").ok();

        if provider == "gemini" && api_key.is_empty() {
            return Err(LlmError::Configuration(
                "GEMINI_API_KEY is required when LLM_PROVIDER=gemini".to_string(),
            ));
        }

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
        })
    }

    /// Mock configuration for tests
    pub fn mock() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            model: mock::MOCK_MODEL.to_string(),
            base_url: None,
        }
    }
}

/// Text generation service
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Generate a completion for a single-turn prompt
    async fn generate(&self, prompt: &str) -> Result<Completion, LlmError>;

    /// Model name reported in blog metadata
    fn model(&self) -> &str;
}

/// LLM service factory
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Create LLM service based on configuration
    pub fn create(config: LlmConfig) -> Result<Arc<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "gemini" => {
                if config.api_key.is_empty() {
                    return Err(LlmError::Configuration(
                        "GEMINI_API_KEY is required when LLM_PROVIDER=gemini".to_string(),
                    ));
                }
                tracing::info!(model = %config.model, "Creating Gemini LLM service");
                Ok(Arc::new(gemini::GeminiService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Arc::new(mock::MockLlmService::new()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: gemini, mock",
                provider
            ))),
        }
    }
}
