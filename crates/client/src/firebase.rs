//! Firebase Authentication over the Identity Toolkit REST API
//!
//! Email/password sign-in, account creation and profile updates go to
//! `https://identitytoolkit.googleapis.com/v1/accounts:*?key=<apiKey>`, or to
//! the auth emulator when one is configured.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use scriptly_common::FirebaseWebConfig;

use crate::identity::{
    EmailCredential, FederatedProvider, Identity, IdentityError, IdentityProvider,
};

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

/// Common shape of `signUp`, `signInWithPassword` and `update` answers
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Firebase Authentication client
pub struct FirebaseIdentity {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FirebaseIdentity {
    pub fn new(config: &FirebaseWebConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at another Identity Toolkit host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use the auth emulator at `host:port`
    pub fn with_emulator(self, host: &str) -> Self {
        tracing::info!(host = %host, "Using Firebase auth emulator");
        self.with_base_url(format!("http://{}/identitytoolkit.googleapis.com", host))
    }

    async fn call<B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<AccountResponse, IdentityError> {
        let url = format!("{}/v1/accounts:{}", self.base_url, method);
        tracing::debug!(method = %method, "Identity Toolkit request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !status.is_success() {
            return match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(error_response) => Err(IdentityError::Provider(error_response.error.message)),
                Err(_) => Err(IdentityError::MalformedResponse(format!(
                    "HTTP {}: {}",
                    status, text
                ))),
            };
        }

        serde_json::from_str(&text).map_err(|e| IdentityError::MalformedResponse(e.to_string()))
    }

    fn identity_from(response: AccountResponse) -> Result<Identity, IdentityError> {
        let id_token = response.id_token.ok_or_else(|| {
            IdentityError::MalformedResponse("response has no idToken".to_string())
        })?;

        Ok(Identity {
            uid: response.local_id,
            email: response.email,
            display_name: response.display_name.filter(|n| !n.is_empty()),
            id_token,
        })
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in_with_popup(
        &self,
        provider: FederatedProvider,
    ) -> Result<Identity, IdentityError> {
        Err(IdentityError::Unsupported(provider))
    }

    async fn sign_in_with_password(
        &self,
        credential: &EmailCredential,
    ) -> Result<Identity, IdentityError> {
        let body = PasswordRequest {
            email: &credential.email,
            password: &credential.password,
            return_secure_token: true,
        };
        Self::identity_from(self.call("signInWithPassword", &body).await?)
    }

    async fn create_user(&self, credential: &EmailCredential) -> Result<Identity, IdentityError> {
        let body = PasswordRequest {
            email: &credential.email,
            password: &credential.password,
            return_secure_token: true,
        };
        let identity = Self::identity_from(self.call("signUp", &body).await?)?;
        tracing::info!(uid = %identity.uid, "Created account");
        Ok(identity)
    }

    async fn update_display_name(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Result<Identity, IdentityError> {
        let body = UpdateProfileRequest {
            id_token: &identity.id_token,
            display_name,
            return_secure_token: true,
        };
        let response = self.call("update", &body).await?;

        // Profile updates only return a fresh token on some backends
        Ok(Identity {
            uid: identity.uid.clone(),
            email: response.email.or_else(|| identity.email.clone()),
            display_name: Some(display_name.to_string()),
            id_token: response
                .id_token
                .unwrap_or_else(|| identity.id_token.clone()),
        })
    }
}
