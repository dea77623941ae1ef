//! Calls to the Scriptly action endpoints

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use scriptly_common::{
    FirebaseWebConfig, GenerateRequest, GenerationResult, SessionExchangeResult,
    VerifyTokenRequest, GENERATE_ENDPOINT, VERIFY_ENDPOINT, WEB_CONFIG_ENDPOINT,
};

use crate::error::ClientError;

/// The two endpoints the page scripts talk to
#[async_trait::async_trait]
pub trait ScriptlyApi: Send + Sync {
    /// `POST /api/generate`
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, ClientError>;

    /// `POST /api/auth/verify`
    async fn verify_token(&self, id_token: &str) -> Result<SessionExchangeResult, ClientError>;
}

/// reqwest-backed API client.
///
/// Keeps cookies between calls, so the session set by `verify_token`
/// authenticates later `generate` calls the way a browser would.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign-in configuration the server embeds in its login pages
    pub async fn fetch_web_config(&self) -> Result<FirebaseWebConfig, ClientError> {
        let url = format!("{}{}", self.base_url, WEB_CONFIG_ENDPOINT);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::MalformedResponse(format!(
                "HTTP {} from {}",
                status, WEB_CONFIG_ENDPOINT
            )));
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    /// POST JSON and parse the JSON answer whatever the status code
    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(status = %status, error = %e, "Response body is not the expected JSON");
            ClientError::MalformedResponse(format!("HTTP {}: {}", status, e))
        })
    }
}

#[async_trait::async_trait]
impl ScriptlyApi for HttpBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, ClientError> {
        self.post_json(GENERATE_ENDPOINT, request).await
    }

    async fn verify_token(&self, id_token: &str) -> Result<SessionExchangeResult, ClientError> {
        let body = VerifyTokenRequest {
            id_token: id_token.to_string(),
        };
        self.post_json(VERIFY_ENDPOINT, &body).await
    }
}
