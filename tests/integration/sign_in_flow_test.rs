//! Sign-in handoff against the real router: identity provider → ID token →
//! `/api/auth/verify` → session cookie → navigation

use std::sync::Arc;

use scriptly_client::identity::IdentityError;
use scriptly_client::mock::{IdentityCall, MockIdentityProvider, RecordingPage};
use scriptly_client::page::dom;
use scriptly_client::{
    AuthForm, AuthHandoff, AuthStage, ClickDispatcher, ClickDisposition, Element, FlowOutcome,
    IdentityProvider, ScriptlyApi,
};

mod common;

use common::TestServer;

fn handoff(
    server: &TestServer,
    page: Arc<RecordingPage>,
    identity: Arc<MockIdentityProvider>,
) -> Arc<AuthHandoff> {
    let handoff = AuthHandoff::from_page(page, server.backend(), move |_| {
        identity as Arc<dyn IdentityProvider>
    })
    .unwrap()
    .expect("page embeds #firebase-config");
    Arc::new(handoff)
}

#[test_log::test(tokio::test)]
async fn test_signup_names_account_then_lands_on_dashboard() {
    let server = TestServer::start().await.unwrap();
    let page = common::signup_page();
    let identity = common::identity_provider();
    let handoff = handoff(&server, page.clone(), identity.clone());
    let dispatcher = ClickDispatcher::new(Some(handoff.clone()));

    let disposition = dispatcher
        .submit(&AuthForm::signup("ann@example.com", "hunter22", "Ann Lee"))
        .await;

    assert_eq!(
        disposition,
        ClickDisposition::Intercepted(FlowOutcome::Redirected("/dashboard".to_string()))
    );
    assert_eq!(page.navigations(), vec!["/dashboard"]);
    assert!(page.alerts().is_empty());
    assert_eq!(handoff.stage(), AuthStage::Redirected);
    assert_eq!(
        identity.recorded_calls(),
        vec![
            IdentityCall::CreateUser("ann@example.com".to_string()),
            IdentityCall::UpdateDisplayName("Ann Lee".to_string()),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_login_page_uses_password_sign_in() {
    let server = TestServer::start().await.unwrap();
    let page = common::login_page();
    let identity = common::identity_provider();
    let handoff = handoff(&server, page.clone(), identity.clone());

    let outcome = handoff
        .submit_form(&AuthForm::login("ann@example.com", "hunter22"))
        .await;

    assert_eq!(outcome, FlowOutcome::Redirected("/dashboard".to_string()));
    assert_eq!(
        identity.recorded_calls(),
        vec![IdentityCall::SignInWithPassword("ann@example.com".to_string())]
    );
}

#[test_log::test(tokio::test)]
async fn test_google_button_click_signs_in() {
    let server = TestServer::start().await.unwrap();
    let page = common::login_page();
    let identity = common::identity_provider();
    let dispatcher = ClickDispatcher::new(Some(handoff(&server, page.clone(), identity.clone())));

    let icon = Element::new().with_class("bi-google");
    let button = Element::new().with_id(dom::GOOGLE_SIGN_IN);
    let disposition = dispatcher.click(&[icon, button]).await;

    assert!(matches!(
        disposition,
        ClickDisposition::Intercepted(FlowOutcome::Redirected(ref location)) if location == "/dashboard"
    ));
    assert_eq!(identity.recorded_calls().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_server_rejection_is_alerted() {
    let server = TestServer::start().await.unwrap();
    let page = common::login_page();
    // Tokens not signed with the server's secret
    let identity = Arc::new(MockIdentityProvider::new());
    let handoff = handoff(&server, page.clone(), identity);

    let outcome = handoff
        .submit_form(&AuthForm::login("ann@example.com", "hunter22"))
        .await;

    let expected = "Login failed: Invalid or expired ID token".to_string();
    assert_eq!(outcome, FlowOutcome::Failed(expected.clone()));
    assert_eq!(page.alerts(), vec![expected]);
    assert!(page.navigations().is_empty());
    assert_eq!(handoff.stage(), AuthStage::Errored);
}

#[test_log::test(tokio::test)]
async fn test_provider_error_shown_verbatim() {
    let server = TestServer::start().await.unwrap();
    let page = common::login_page();
    let identity = common::identity_provider();
    identity.fail_next(IdentityError::Provider("INVALID_LOGIN_CREDENTIALS".to_string()));
    let handoff = handoff(&server, page.clone(), identity);

    let outcome = handoff
        .submit_form(&AuthForm::login("ann@example.com", "wrong"))
        .await;

    assert_eq!(outcome, FlowOutcome::Failed("INVALID_LOGIN_CREDENTIALS".to_string()));
    assert_eq!(page.alerts(), vec!["INVALID_LOGIN_CREDENTIALS"]);
    assert!(page.navigations().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_logout_link_is_left_to_the_browser() {
    let server = TestServer::start().await.unwrap();
    let page = common::login_page();
    let identity = common::identity_provider();
    let dispatcher = ClickDispatcher::new(Some(handoff(&server, page.clone(), identity.clone())));

    let path = [
        Element::new()
            .with_class(dom::NAV_LINK_CLASS)
            .with_class(dom::LOGOUT_CLASS),
    ];
    assert_eq!(dispatcher.click(&path).await, ClickDisposition::PassThrough);
    assert!(identity.recorded_calls().is_empty());

    let response = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
        .get(format!("{}/logout", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/login");
}

#[test_log::test(tokio::test)]
async fn test_page_without_config_installs_nothing() {
    let server = TestServer::start().await.unwrap();
    let page = Arc::new(RecordingPage::new().with_path("/dashboard"));

    let handoff = AuthHandoff::from_page(page, server.backend(), |_| {
        common::identity_provider() as Arc<dyn IdentityProvider>
    })
    .unwrap();

    assert!(handoff.is_none());
}

#[test_log::test(tokio::test)]
async fn test_served_config_matches_embedded_config() {
    let server = TestServer::start().await.unwrap();

    let config = server.backend().fetch_web_config().await.unwrap();

    assert_eq!(config, common::web_config());
}

#[test_log::test(tokio::test)]
async fn test_missing_token_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let result = server.backend().verify_token("").await.unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Missing ID token"));
}
