//! JSON bodies exchanged between the page scripts and the action endpoints
//!
//! Both endpoints answer with a `success` flag plus either a redirect target
//! or a human-readable error. Field names follow the browser contract
//! (`user_id` is snake_case, `idToken` is camelCase).

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Content generation endpoint
pub const GENERATE_ENDPOINT: &str = "/api/generate";

/// Identity token exchange endpoint
pub const VERIFY_ENDPOINT: &str = "/api/auth/verify";

/// Public sign-in configuration, for hosts that cannot read `#firebase-config`
pub const WEB_CONFIG_ENDPOINT: &str = "/api/auth/config";

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(custom(function = "not_blank"))]
    pub prompt: String,
    #[serde(default)]
    pub user_id: String,
    /// Skip the drafts stage and queue the blog for review directly
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto_submit: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            user_id: user_id.into(),
            auto_submit: false,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Prompt is required".into());
        return Err(error);
    }
    Ok(())
}

/// Response of `POST /api/generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn created(blog_id: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            blog_id: Some(blog_id.into()),
            redirect: Some(redirect.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Body of `POST /api/auth/verify`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(rename = "idToken")]
    pub id_token: String,
}

/// Response of `POST /api/auth/verify` (and the other session-scoped actions)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionExchangeResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionExchangeResult {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            success: true,
            redirect: Some(location.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            redirect: None,
            error: Some(error.into()),
        }
    }
}
