//! Scriptly application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;

use axum::Router;
use scriptly_accounts::{AccountsRepositories, AccountsState};
use scriptly_auth::{AuthBackend, AuthConfig};
use scriptly_blogs::{BlogPipeline, BlogsRepositories, BlogsState};
use scriptly_common::Config;
use scriptly_llm::{LlmConfig, LlmService, LlmServiceFactory};

/// Create the main application router, building services from configuration
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    let mut llm_config = LlmConfig::from_env()?;
    llm_config.provider = config.llm_provider.clone();
    let llm = LlmServiceFactory::create(llm_config)?;

    Ok(create_app_with_llm(config, llm))
}

/// Create the application router around an existing text generation service
pub fn create_app_with_llm(config: Config, llm: Arc<dyn LlmService>) -> Router {
    let auth = AuthBackend::new(AuthConfig::from_config(&config));

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(),
        auth: auth.clone(),
        firebase: config.firebase.clone(),
    };

    let blogs_state = BlogsState {
        repos: BlogsRepositories::new(),
        auth,
        pipeline: BlogPipeline::new(llm),
    };

    // Domain routers plus the shared infrastructure routes
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Scriptly API v0.0.1-SNAPSHOT" }),
        )
        .merge(scriptly_accounts::routes().with_state(accounts_state))
        .merge(scriptly_blogs::routes().with_state(blogs_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
