//! Generation trigger against the real router, with and without a session

use std::sync::Arc;

use scriptly_client::mock::RecordingPage;
use scriptly_client::{
    highlight_active_links, AuthForm, AuthHandoff, ControlState, FlowOutcome, GenerationTrigger,
    HttpBackend, IdentityProvider, DEFAULT_USER_ID, EMPTY_PROMPT_ALERT,
};
use serde_json::Value;

mod common;

use common::TestServer;

/// Sign in through the login page, leaving the session cookie in `backend`
async fn sign_in(backend: Arc<HttpBackend>, email: &str) {
    let identity = common::identity_provider();
    let handoff = AuthHandoff::from_page(common::login_page(), backend, move |_| {
        identity as Arc<dyn IdentityProvider>
    })
    .unwrap()
    .unwrap();

    let outcome = handoff.submit_form(&AuthForm::login(email, "hunter22")).await;
    assert!(outcome.is_redirect(), "sign-in failed: {outcome:?}");
}

fn trigger(page: &Arc<RecordingPage>, backend: &Arc<HttpBackend>) -> GenerationTrigger {
    GenerationTrigger::new(page.clone(), backend.clone(), DEFAULT_USER_ID)
}

#[test_log::test(tokio::test)]
async fn test_generate_lands_on_drafts_and_highlights_nav() {
    let server = TestServer::start().await.unwrap();
    let backend = server.backend();
    sign_in(backend.clone(), "ann@example.com").await;

    server.llm.push_response("Intro\nWhy Rust\nWrap-up");
    server.llm.push_response("# Rust\n\nRust is **fast** and safe.");
    server.llm.push_response("Programming");

    let page = common::dashboard_page("rust for beginners");
    let outcome = trigger(&page, &backend).trigger().await;

    assert_eq!(outcome, FlowOutcome::Redirected("/drafts".to_string()));
    assert_eq!(page.navigations(), vec!["/drafts"]);
    assert!(page.alerts().is_empty());
    assert_eq!(page.control_history(), vec![ControlState::BUSY, ControlState::IDLE]);

    // The drafts page highlights its own sidebar entry
    assert_eq!(highlight_active_links(page.as_ref()), 1);
    assert_eq!(page.active_nav_links(), vec![2]);

    let prompts = server.llm.recorded_prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("rust for beginners"));
}

#[test_log::test(tokio::test)]
async fn test_auto_submit_lands_on_approval() {
    let server = TestServer::start().await.unwrap();
    let backend = server.backend();
    sign_in(backend.clone(), "ann@example.com").await;

    let page = common::dashboard_page("weekly product update");
    let outcome = trigger(&page, &backend)
        .with_auto_submit(true)
        .trigger()
        .await;

    assert_eq!(outcome, FlowOutcome::Redirected("/approval".to_string()));
}

#[test_log::test(tokio::test)]
async fn test_generate_without_session_alerts() {
    let server = TestServer::start().await.unwrap();
    let backend = server.backend();

    let page = common::dashboard_page("rust");
    let outcome = trigger(&page, &backend).trigger().await;

    let expected = "Oops! Something went wrong: Not logged in".to_string();
    assert_eq!(outcome, FlowOutcome::Failed(expected.clone()));
    assert_eq!(page.alerts(), vec![expected]);
    assert!(page.navigations().is_empty());
    assert!(server.llm.recorded_prompts().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_pipeline_failure_alerts_and_restores_controls() {
    let server = TestServer::start().await.unwrap();
    let backend = server.backend();
    sign_in(backend.clone(), "ann@example.com").await;
    server.llm.push_failure("model overloaded");

    let page = common::dashboard_page("rust");
    let outcome = trigger(&page, &backend).trigger().await;

    match outcome {
        FlowOutcome::Failed(message) => {
            assert!(message.starts_with("Oops! Something went wrong: "));
            assert!(message.contains("model overloaded"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(page.navigations().is_empty());
    assert_eq!(page.control_history().last(), Some(&ControlState::IDLE));
}

#[test_log::test(tokio::test)]
async fn test_blank_prompt_never_calls_server() {
    let server = TestServer::start().await.unwrap();
    let backend = server.backend();
    sign_in(backend.clone(), "ann@example.com").await;

    let page = common::dashboard_page("   ");
    let outcome = trigger(&page, &backend).trigger().await;

    assert_eq!(outcome, FlowOutcome::Invalid(EMPTY_PROMPT_ALERT.to_string()));
    assert!(page.control_history().is_empty());
    assert!(server.llm.recorded_prompts().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_activity_records_session_user() {
    let server = TestServer::start().await.unwrap();
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let identity = scriptly_client::Identity::new("uid-ann", "")
        .with_email("ann@example.com")
        .with_display_name("Ann Lee");
    let response = client
        .post(format!("{}/api/auth/verify", server.base_url))
        .json(&serde_json::json!({"idToken": common::mint_id_token(&identity)}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/api/generate", server.base_url))
        .json(&serde_json::json!({"prompt": "rust", "user_id": DEFAULT_USER_ID}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let dashboard: Value = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["total_blogs"], 1);
    assert_eq!(dashboard["drafts"], 1);
    assert_eq!(dashboard["recent_activity"][0]["user"], "Ann Lee");
    assert_eq!(dashboard["recent_activity"][0]["type"], "generated");

    let drafts: Value = client
        .get(format!("{}/api/drafts?page=1", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(drafts["total_count"], 1);
    assert_eq!(drafts["blogs"][0]["author_id"], "uid-ann");
    assert_eq!(drafts["has_next"], false);
}
