//! Router harness shared by the handler tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::COOKIE, Request},
    Router,
};
use scriptly_auth::{AuthBackend, AuthConfig, KeySource, Session, SESSION_COOKIE};
use scriptly_llm::mock::MockLlmService;
use serde_json::Value;

use crate::api::middleware::BlogsState;
use crate::domain::entities::{Blog, BlogContent, BlogStatus};
use crate::repository::BlogsRepositories;
use crate::BlogPipeline;

pub(crate) struct Harness {
    pub state: BlogsState,
    pub llm: Arc<MockLlmService>,
    cookie: String,
}

pub(crate) fn harness() -> Harness {
    let llm = Arc::new(MockLlmService::new());
    let auth = AuthBackend::new(AuthConfig {
        project_id: "scriptly-test".to_string(),
        key_source: KeySource::SharedSecret("emu".to_string()),
        session_secret: "session-secret".to_string(),
        session_ttl_secs: 3600,
    });
    let token = auth
        .issue_session(&Session {
            user_id: "uid-ann".to_string(),
            user_name: "Ann".to_string(),
            email: Some("ann@b.com".to_string()),
        })
        .unwrap();

    Harness {
        state: BlogsState {
            repos: BlogsRepositories::new(),
            auth,
            pipeline: BlogPipeline::new(llm.clone()),
        },
        llm,
        cookie: format!("{SESSION_COOKIE}={token}"),
    }
}

impl Harness {
    pub fn app(&self) -> Router {
        crate::routes().with_state(self.state.clone())
    }

    /// Request carrying Ann's session cookie
    pub fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(COOKIE, &self.cookie);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Store a blog filed under `Tech`
    pub async fn seed(&self, status: BlogStatus) -> Blog {
        self.seed_in("Tech", status).await
    }

    pub async fn seed_in(&self, category: &str, status: BlogStatus) -> Blog {
        let mut blog = Blog::new(
            "Seeded".to_string(),
            vec!["Intro".to_string()],
            BlogContent::from_markdown("seeded body"),
            category.to_string(),
            "uid-ann".to_string(),
            "mock-model".to_string(),
        );
        blog.status = status;
        self.state.repos.categories.increment(category).await.unwrap();
        self.state.repos.blogs.create(&blog).await.unwrap()
    }
}

pub(crate) async fn parse_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
