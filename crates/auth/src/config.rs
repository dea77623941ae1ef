//! Authentication configuration

use scriptly_common::Config;

use crate::keys::{KeySource, GOOGLE_JWKS_URL};

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Firebase project the ID tokens must be issued for
    pub project_id: String,
    /// Where ID token signing keys come from
    pub key_source: KeySource,
    /// HS256 secret for session cookies
    pub session_secret: String,
    /// Session cookie lifetime in seconds
    pub session_ttl_secs: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("project_id", &self.project_id)
            .field("key_source", &self.key_source)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

impl AuthConfig {
    /// Derive the auth settings from the server configuration
    pub fn from_config(config: &Config) -> Self {
        let key_source = match (config.auth_key_source.as_str(), &config.auth_shared_secret) {
            ("secret", Some(secret)) => KeySource::SharedSecret(secret.clone()),
            _ => KeySource::GoogleJwks {
                url: GOOGLE_JWKS_URL.to_string(),
            },
        };

        Self {
            project_id: config.firebase.project_id.clone(),
            key_source,
            session_secret: config.secret_key.clone(),
            session_ttl_secs: config.session_ttl_secs,
        }
    }

    /// Issuer Firebase stamps into ID tokens of this project
    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}
