//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Web SDK configuration embedded in login/signup pages (`#firebase-config`).
///
/// Field names are the camelCase keys the browser SDK expects.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseWebConfig {
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub messaging_sender_id: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub measurement_id: Option<String>,
}

impl std::fmt::Debug for FirebaseWebConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseWebConfig")
            .field("api_key", &"[REDACTED]")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

impl FirebaseWebConfig {
    /// Parse the JSON blob a page embeds for SDK initialization
    pub fn from_embedded_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load the web SDK settings from `FB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("FB_API_KEY")
                .map_err(|_| anyhow::anyhow!("FB_API_KEY is required"))?,
            auth_domain: env::var("FB_AUTH_DOMAIN").ok(),
            project_id: env::var("FB_PROJECT_ID")
                .map_err(|_| anyhow::anyhow!("FB_PROJECT_ID is required"))?,
            storage_bucket: env::var("FB_STORAGE_BUCKET").ok(),
            messaging_sender_id: env::var("FB_SENDER_ID").ok(),
            app_id: env::var("FB_APP_ID").ok(),
            measurement_id: env::var("FB_MEASUREMENT_ID").ok(),
        })
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Secret used to sign session cookies
    pub secret_key: String,

    /// Session lifetime in seconds
    pub session_ttl_secs: u64,

    /// Web SDK configuration handed to the login/signup pages
    pub firebase: FirebaseWebConfig,

    /// How ID tokens are verified: `google` (published JWKS) or `secret`
    pub auth_key_source: String,

    /// HS256 secret for emulator/test ID tokens when `auth_key_source=secret`
    pub auth_shared_secret: Option<String>,

    /// Text generation provider (gemini, mock)
    pub llm_provider: String,

    /// Runtime configuration
    pub log_format: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"[REDACTED]")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("firebase", &self.firebase)
            .field("auth_key_source", &self.auth_key_source)
            .field(
                "auth_shared_secret",
                &self.auth_shared_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("llm_provider", &self.llm_provider)
            .field("log_format", &self.log_format)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let auth_key_source = env::var("AUTH_KEY_SOURCE").unwrap_or_else(|_| "google".to_string());
        let auth_shared_secret = env::var("AUTH_SHARED_SECRET").ok();

        if auth_key_source == "secret" && auth_shared_secret.is_none() {
            anyhow::bail!("AUTH_SHARED_SECRET is required when AUTH_KEY_SOURCE=secret");
        }

        let config = Self {
            secret_key: env::var("SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("SECRET_KEY is required"))?,
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .unwrap_or(86400),
            firebase: FirebaseWebConfig::from_env()?,
            auth_key_source,
            auth_shared_secret,
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}
