//! Concrete authentication backend
//!
//! Wraps `AuthConfig` and the signing key cache. Domain states expose this
//! via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::claims::{FirebaseClaims, SessionClaims};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::keys::KeyStore;
use crate::session::{session_token, Session};

/// Concrete authentication backend.
#[derive(Clone)]
pub struct AuthBackend {
    config: AuthConfig,
    keys: Arc<KeyStore>,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        let keys = Arc::new(KeyStore::new(config.key_source.clone()));
        Self { config, keys }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Verify an ID token posted by the login/signup pages
    pub async fn verify_id_token(&self, token: &str) -> Result<FirebaseClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "Malformed ID token header");
            AuthError::InvalidToken
        })?;

        let (key, algorithm) = self.keys.key_for(header.kid.as_deref()).await?;
        if header.alg != algorithm {
            tracing::debug!(alg = ?header.alg, "ID token signed with unexpected algorithm");
            return Err(AuthError::InvalidToken);
        }

        crate::jwt::validate_id_token(token, &key, algorithm, &self.config)
    }

    /// Sign a session for a verified identity; returns the cookie value
    pub fn issue_session(&self, session: &Session) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = SessionClaims {
            sub: session.user_id.clone(),
            name: session.user_name.clone(),
            email: session.email.clone(),
            iat: now,
            exp: now + self.config.session_ttl_secs,
        };
        crate::jwt::encode_session(&claims, &self.config.session_secret)
    }

    /// Session carried by a request's cookies
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Result<Session, AuthError> {
        let token = session_token(headers).ok_or(AuthError::MissingSession)?;
        let claims = crate::jwt::decode_session(&token, &self.config.session_secret)?;
        Ok(claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{fixtures, KeySource};
    use axum::http::{header::COOKIE, HeaderValue};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(key_source: KeySource) -> AuthConfig {
        AuthConfig {
            project_id: "scriptly-test".to_string(),
            key_source,
            session_secret: "session-secret".to_string(),
            session_ttl_secs: 3600,
        }
    }

    fn claims() -> FirebaseClaims {
        let now = chrono::Utc::now().timestamp();
        FirebaseClaims {
            sub: "uid-42".to_string(),
            aud: "scriptly-test".to_string(),
            iss: "https://securetoken.google.com/scriptly-test".to_string(),
            iat: now as u64,
            exp: (now + 600) as u64,
            email: Some("ann@example.com".to_string()),
            email_verified: Some(true),
            name: None,
            picture: None,
        }
    }

    #[tokio::test]
    async fn test_verify_with_shared_secret() {
        let backend = AuthBackend::new(config(KeySource::SharedSecret("emu".to_string())));
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims(),
            &EncodingKey::from_secret(b"emu"),
        )
        .unwrap();

        let verified = backend.verify_id_token(&token).await.unwrap();
        assert_eq!(verified.sub, "uid-42");
        assert_eq!(verified.display_name().as_deref(), Some("ann"));
    }

    #[tokio::test]
    async fn test_verify_with_published_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::jwks_body()))
            .mount(&server)
            .await;

        let backend = AuthBackend::new(config(KeySource::GoogleJwks {
            url: format!("{}/jwks", server.uri()),
        }));

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(fixtures::TEST_KID.to_string());
        let token = encode(&header, &claims(), &fixtures::signing_key()).unwrap();

        let verified = backend.verify_id_token(&token).await.unwrap();
        assert_eq!(verified.sub, "uid-42");
    }

    #[tokio::test]
    async fn test_algorithm_mismatch_rejected() {
        // HS256 token presented where RS256 keys are expected
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::jwks_body()))
            .mount(&server)
            .await;

        let backend = AuthBackend::new(config(KeySource::GoogleJwks {
            url: format!("{}/jwks", server.uri()),
        }));

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(fixtures::TEST_KID.to_string());
        let token = encode(&header, &claims(), &EncodingKey::from_secret(b"x")).unwrap();

        assert!(matches!(
            backend.verify_id_token(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_empty_token_is_missing() {
        let backend = AuthBackend::new(config(KeySource::SharedSecret("emu".to_string())));
        assert!(matches!(
            backend.verify_id_token("  ").await,
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_issued_session_is_read_back_from_cookie() {
        let backend = AuthBackend::new(config(KeySource::SharedSecret("emu".to_string())));
        let session = Session {
            user_id: "uid-42".to_string(),
            user_name: "Ann".to_string(),
            email: Some("ann@example.com".to_string()),
        };

        let token = backend.issue_session(&session).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("scriptly_session={}", token)).unwrap(),
        );

        assert_eq!(backend.session_from_headers(&headers).unwrap(), session);
    }

    #[test]
    fn test_missing_session_cookie() {
        let backend = AuthBackend::new(config(KeySource::SharedSecret("emu".to_string())));
        assert!(matches!(
            backend.session_from_headers(&HeaderMap::new()),
            Err(AuthError::MissingSession)
        ));
    }
}
