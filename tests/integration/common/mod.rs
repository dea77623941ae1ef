#![allow(dead_code)]

//! Common test utilities for integration tests
//!
//! - `TestServer`: the full application router on an ephemeral port, with a
//!   scriptable mock LLM and HS256-verified ID tokens
//! - ID token minting for the mock identity provider
//! - Page fixtures for the login and signup pages

use std::sync::Arc;

use anyhow::Result;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use scriptly_auth::FirebaseClaims;
use scriptly_client::mock::{MockIdentityProvider, RecordingPage};
use scriptly_client::page::dom;
use scriptly_client::{HttpBackend, Identity};
use scriptly_common::{Config, FirebaseWebConfig};
use scriptly_llm::mock::MockLlmService;
use tokio::task::JoinHandle;

pub const PROJECT_ID: &str = "scriptly-test";
pub const ID_TOKEN_SECRET: &str = "emulator-secret";

/// Application served on 127.0.0.1 for the duration of a test
pub struct TestServer {
    pub base_url: String,
    pub llm: Arc<MockLlmService>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let llm = Arc::new(MockLlmService::new());
        let app = scriptly_app::create_app_with_llm(config(), llm.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server stopped: {e}");
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            llm,
            handle,
        })
    }

    /// Fresh cookie-keeping client, like a new browser
    pub fn backend(&self) -> Arc<HttpBackend> {
        Arc::new(HttpBackend::new(&self.base_url).unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn config() -> Config {
    Config {
        secret_key: "integration-session-secret".to_string(),
        session_ttl_secs: 600,
        firebase: web_config(),
        auth_key_source: "secret".to_string(),
        auth_shared_secret: Some(ID_TOKEN_SECRET.to_string()),
        llm_provider: "mock".to_string(),
        log_format: "pretty".to_string(),
        port: 0,
    }
}

pub fn web_config() -> FirebaseWebConfig {
    FirebaseWebConfig {
        api_key: "integration-web-key".to_string(),
        auth_domain: Some(format!("{PROJECT_ID}.firebaseapp.com")),
        project_id: PROJECT_ID.to_string(),
        ..Default::default()
    }
}

/// ID token the test server accepts for `identity`
pub fn mint_id_token(identity: &Identity) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = FirebaseClaims {
        sub: identity.uid.clone(),
        aud: PROJECT_ID.to_string(),
        iss: format!("https://securetoken.google.com/{PROJECT_ID}"),
        iat: now,
        exp: now + 600,
        email: identity.email.clone(),
        email_verified: Some(true),
        name: identity.display_name.clone(),
        picture: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(ID_TOKEN_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Identity provider whose tokens verify against the test server
pub fn identity_provider() -> Arc<MockIdentityProvider> {
    Arc::new(MockIdentityProvider::with_token_issuer(mint_id_token))
}

fn embedded_config() -> String {
    serde_json::to_string(&web_config()).unwrap()
}

pub fn login_page() -> Arc<RecordingPage> {
    Arc::new(
        RecordingPage::new()
            .with_path("/login")
            .with_element(dom::GOOGLE_SIGN_IN)
            .with_embedded(dom::FIREBASE_CONFIG, &embedded_config()),
    )
}

pub fn signup_page() -> Arc<RecordingPage> {
    Arc::new(
        RecordingPage::new()
            .with_path("/signup")
            .with_element(dom::GOOGLE_SIGN_UP)
            .with_embedded(dom::FIREBASE_CONFIG, &embedded_config()),
    )
}

/// Dashboard with the standard sidebar
pub fn dashboard_page(prompt: &str) -> Arc<RecordingPage> {
    Arc::new(
        RecordingPage::new()
            .with_path("/create")
            .with_prompt(prompt)
            .with_nav_link(Some("/dashboard"))
            .with_nav_link(Some("/create"))
            .with_nav_link(Some("/drafts"))
            .with_nav_link(Some("/approval")),
    )
}
