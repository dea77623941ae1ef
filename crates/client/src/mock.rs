//! Test doubles for the client flows
//!
//! - `RecordingPage`: in-memory page recording alerts, navigations and
//!   control changes
//! - `MockScriptlyApi`: scripted backend answers with request recording
//! - `MockIdentityProvider`: identity provider with a pluggable token issuer

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use scriptly_common::{GenerateRequest, GenerationResult, SessionExchangeResult};

use crate::backend::ScriptlyApi;
use crate::error::ClientError;
use crate::identity::{
    EmailCredential, FederatedProvider, Identity, IdentityError, IdentityProvider,
};
use crate::page::{ControlState, Page};

#[derive(Debug, Default)]
struct PageState {
    prompt: Option<String>,
    controls: ControlState,
    control_history: Vec<ControlState>,
    alerts: Vec<String>,
    navigations: Vec<String>,
    path: String,
    nav_links: Vec<(Option<String>, bool)>,
    elements: HashSet<String>,
    texts: HashMap<String, String>,
}

/// In-memory page
#[derive(Debug, Default)]
pub struct RecordingPage {
    state: Mutex<PageState>,
}

impl RecordingPage {
    pub fn new() -> Self {
        let page = Self::default();
        page.state.lock().unwrap().path = "/".to_string();
        page
    }

    pub fn with_prompt(self, prompt: &str) -> Self {
        self.set_prompt(prompt);
        self
    }

    pub fn with_path(self, path: &str) -> Self {
        self.state.lock().unwrap().path = path.to_string();
        self
    }

    /// Append a `.list-group-item`; `None` for a link without `href`
    pub fn with_nav_link(self, href: Option<&str>) -> Self {
        self.state
            .lock()
            .unwrap()
            .nav_links
            .push((href.map(str::to_string), false));
        self
    }

    pub fn with_element(self, id: &str) -> Self {
        self.state.lock().unwrap().elements.insert(id.to_string());
        self
    }

    /// Element with text content, such as `#firebase-config`
    pub fn with_embedded(self, id: &str, text: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.elements.insert(id.to_string());
            state.texts.insert(id.to_string(), text.to_string());
        }
        self
    }

    pub fn set_prompt(&self, prompt: &str) {
        self.state.lock().unwrap().prompt = Some(prompt.to_string());
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().unwrap().alerts.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    /// Every state passed to `apply_controls`, in order
    pub fn control_history(&self) -> Vec<ControlState> {
        self.state.lock().unwrap().control_history.clone()
    }

    /// Indexes of nav links carrying `.active`
    pub fn active_nav_links(&self) -> Vec<usize> {
        self.state
            .lock()
            .unwrap()
            .nav_links
            .iter()
            .enumerate()
            .filter(|(_, (_, active))| *active)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Page for RecordingPage {
    fn prompt_value(&self) -> Option<String> {
        self.state.lock().unwrap().prompt.clone()
    }

    fn control_state(&self) -> ControlState {
        self.state.lock().unwrap().controls
    }

    fn apply_controls(&self, controls: ControlState) {
        let mut state = self.state.lock().unwrap();
        state.controls = controls;
        state.control_history.push(controls);
    }

    fn alert(&self, message: &str) {
        self.state.lock().unwrap().alerts.push(message.to_string());
    }

    fn navigate(&self, location: &str) {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(location.to_string());
        state.path = location.to_string();
    }

    fn current_path(&self) -> String {
        self.state.lock().unwrap().path.clone()
    }

    fn nav_links(&self) -> Vec<Option<String>> {
        self.state
            .lock()
            .unwrap()
            .nav_links
            .iter()
            .map(|(href, _)| href.clone())
            .collect()
    }

    fn mark_nav_active(&self, index: usize) {
        if let Some(link) = self.state.lock().unwrap().nav_links.get_mut(index) {
            link.1 = true;
        }
    }

    fn has_element(&self, id: &str) -> bool {
        self.state.lock().unwrap().elements.contains(id)
    }

    fn element_text(&self, id: &str) -> Option<String> {
        self.state.lock().unwrap().texts.get(id).cloned()
    }
}

/// Backend double. Unscripted calls succeed with `/drafts` and
/// `/dashboard` redirects.
#[derive(Debug, Default)]
pub struct MockScriptlyApi {
    generate_responses: Mutex<VecDeque<Result<GenerationResult, ClientError>>>,
    verify_responses: Mutex<VecDeque<Result<SessionExchangeResult, ClientError>>>,
    generate_requests: Mutex<Vec<GenerateRequest>>,
    tokens: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl MockScriptlyApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_generate(&self, response: Result<GenerationResult, ClientError>) {
        self.generate_responses.lock().unwrap().push_back(response);
    }

    pub fn push_verify(&self, response: Result<SessionExchangeResult, ClientError>) {
        self.verify_responses.lock().unwrap().push_back(response);
    }

    /// Delay every call, to observe in-flight behavior
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn recorded_generate_requests(&self) -> Vec<GenerateRequest> {
        self.generate_requests.lock().unwrap().clone()
    }

    pub fn recorded_tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait::async_trait]
impl ScriptlyApi for MockScriptlyApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, ClientError> {
        self.generate_requests.lock().unwrap().push(request.clone());
        self.pause().await;

        let scripted = self.generate_responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(GenerationResult::created("blog-1", "/drafts")))
    }

    async fn verify_token(&self, id_token: &str) -> Result<SessionExchangeResult, ClientError> {
        self.tokens.lock().unwrap().push(id_token.to_string());
        self.pause().await;

        let scripted = self.verify_responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(SessionExchangeResult::redirect("/dashboard")))
    }
}

/// Identity provider call, for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCall {
    Popup(FederatedProvider),
    SignInWithPassword(String),
    CreateUser(String),
    UpdateDisplayName(String),
}

type TokenIssuer = Box<dyn Fn(&Identity) -> String + Send + Sync>;

/// Identity provider double.
///
/// Tokens come from the issuer, so tests against a real server can mint
/// tokens the server accepts.
pub struct MockIdentityProvider {
    calls: Mutex<Vec<IdentityCall>>,
    failures: Mutex<VecDeque<IdentityError>>,
    issuer: TokenIssuer,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::with_token_issuer(|identity| format!("mock-id-token:{}", identity.uid))
    }

    pub fn with_token_issuer<F>(issuer: F) -> Self
    where
        F: Fn(&Identity) -> String + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            issuer: Box::new(issuer),
        }
    }

    /// Fail the next provider call
    pub fn fail_next(&self, error: IdentityError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn recorded_calls(&self) -> Vec<IdentityCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: IdentityCall) -> Result<(), IdentityError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn issue(&self, mut identity: Identity) -> Identity {
        identity.id_token = (self.issuer)(&identity);
        identity
    }

    fn uid_for(email: &str) -> String {
        format!("uid-{}", email.replace(|c: char| !c.is_ascii_alphanumeric(), "-"))
    }
}

impl std::fmt::Debug for MockIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockIdentityProvider")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in_with_popup(
        &self,
        provider: FederatedProvider,
    ) -> Result<Identity, IdentityError> {
        self.record(IdentityCall::Popup(provider))?;
        Ok(self.issue(
            Identity::new("uid-google-user", "")
                .with_email("google.user@example.com")
                .with_display_name("Google User"),
        ))
    }

    async fn sign_in_with_password(
        &self,
        credential: &EmailCredential,
    ) -> Result<Identity, IdentityError> {
        self.record(IdentityCall::SignInWithPassword(credential.email.clone()))?;
        Ok(self.issue(
            Identity::new(Self::uid_for(&credential.email), "").with_email(&credential.email),
        ))
    }

    async fn create_user(&self, credential: &EmailCredential) -> Result<Identity, IdentityError> {
        self.record(IdentityCall::CreateUser(credential.email.clone()))?;
        Ok(self.issue(
            Identity::new(Self::uid_for(&credential.email), "").with_email(&credential.email),
        ))
    }

    async fn update_display_name(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Result<Identity, IdentityError> {
        self.record(IdentityCall::UpdateDisplayName(display_name.to_string()))?;
        Ok(self.issue(identity.clone().with_display_name(display_name)))
    }
}
