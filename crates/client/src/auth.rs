//! Identity-provider sign-in handoff
//!
//! Every flow runs the same way. The user signs in with the identity
//! provider (Google popup or the email/password form). The handler then
//! asks for the identity's ID token and posts it to `/api/auth/verify`.
//! The server answers with a session cookie and a redirect, or an error
//! that is shown to the user.
//!
//! ```text
//! Idle → Submitted → TokenObtained → Exchanged → Redirected
//!            ↘             ↘             ↘
//!                        Errored
//! ```

use std::sync::{Arc, Mutex};

use scriptly_common::FirebaseWebConfig;

use crate::backend::ScriptlyApi;
use crate::error::ClientError;
use crate::identity::{EmailCredential, FederatedProvider, Identity, IdentityProvider};
use crate::outcome::{FlowOutcome, InFlight};
use crate::page::{dom, Page};

const LOGIN_FAILED_PREFIX: &str = "Login failed: ";

/// Progress of the most recent sign-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStage {
    #[default]
    Idle,
    Submitted,
    TokenObtained,
    Exchanged,
    Redirected,
    Errored,
}

impl AuthStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthStage::Redirected | AuthStage::Errored)
    }
}

impl std::fmt::Display for AuthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuthStage::Idle => "idle",
            AuthStage::Submitted => "submitted",
            AuthStage::TokenObtained => "token_obtained",
            AuthStage::Exchanged => "exchanged",
            AuthStage::Redirected => "redirected",
            AuthStage::Errored => "errored",
        };
        write!(f, "{}", name)
    }
}

/// Fields of the login/signup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    pub credential: EmailCredential,
    /// Only read on the signup page
    pub username: Option<String>,
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential: EmailCredential {
                email: email.into(),
                password: password.into(),
            },
            username: None,
        }
    }

    pub fn signup(
        email: impl Into<String>,
        password: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::login(email, password)
        }
    }
}

/// Hands provider identities over to the backend session endpoint
pub struct AuthHandoff {
    config: FirebaseWebConfig,
    page: Arc<dyn Page>,
    api: Arc<dyn ScriptlyApi>,
    identity: Arc<dyn IdentityProvider>,
    in_flight: InFlight,
    stage: Mutex<AuthStage>,
}

impl AuthHandoff {
    pub fn new(
        config: FirebaseWebConfig,
        page: Arc<dyn Page>,
        api: Arc<dyn ScriptlyApi>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            config,
            page,
            api,
            identity,
            in_flight: InFlight::new(),
            stage: Mutex::new(AuthStage::Idle),
        }
    }

    /// Build the handler from the configuration embedded in the page.
    ///
    /// Pages without `#firebase-config` get no handler (`Ok(None)`).
    /// `identity` builds the provider for the parsed configuration.
    pub fn from_page<F>(
        page: Arc<dyn Page>,
        api: Arc<dyn ScriptlyApi>,
        identity: F,
    ) -> Result<Option<Self>, ClientError>
    where
        F: FnOnce(&FirebaseWebConfig) -> Arc<dyn IdentityProvider>,
    {
        let Some(text) = page.element_text(dom::FIREBASE_CONFIG) else {
            tracing::debug!("No #firebase-config on page, sign-in handler not installed");
            return Ok(None);
        };

        let config = FirebaseWebConfig::from_embedded_json(&text).map_err(|e| {
            ClientError::Configuration(format!("invalid #firebase-config: {}", e))
        })?;

        tracing::debug!(project_id = %config.project_id, "Sign-in handler installed");
        let provider = identity(&config);
        Ok(Some(Self::new(config, page, api, provider)))
    }

    pub fn config(&self) -> &FirebaseWebConfig {
        &self.config
    }

    /// The signup page is the one offering `#googleSignUp`
    pub fn is_signup_page(&self) -> bool {
        self.page.has_element(dom::GOOGLE_SIGN_UP)
    }

    /// Stage reached by the latest attempt
    pub fn stage(&self) -> AuthStage {
        *self.stage.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn advance(&self, next: AuthStage) {
        tracing::debug!(stage = %next, "Sign-in progress");
        *self.stage.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// `#googleSignIn` / `#googleSignUp`
    pub async fn sign_in_with_google(&self) -> FlowOutcome {
        let Some(_flight) = self.in_flight.try_acquire() else {
            return FlowOutcome::Busy;
        };
        self.advance(AuthStage::Submitted);

        let identity = self
            .identity
            .sign_in_with_popup(FederatedProvider::Google)
            .await;
        match identity {
            Ok(identity) => self.exchange(&identity).await,
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Email/password form submission
    pub async fn submit_form(&self, form: &AuthForm) -> FlowOutcome {
        let Some(_flight) = self.in_flight.try_acquire() else {
            return FlowOutcome::Busy;
        };
        self.advance(AuthStage::Submitted);

        let identity = if self.is_signup_page() {
            self.create_account(form).await
        } else {
            self.identity
                .sign_in_with_password(&form.credential)
                .await
                .map_err(ClientError::from)
        };

        match identity {
            Ok(identity) => self.exchange(&identity).await,
            Err(e) => self.fail(e.to_string()),
        }
    }

    async fn create_account(&self, form: &AuthForm) -> Result<Identity, ClientError> {
        let created = self.identity.create_user(&form.credential).await?;
        let username = form.username.as_deref().unwrap_or_default();
        let named = self.identity.update_display_name(&created, username).await?;
        Ok(named)
    }

    async fn exchange(&self, identity: &Identity) -> FlowOutcome {
        let token = match self.identity.id_token(identity).await {
            Ok(token) => token,
            Err(e) => return self.fail(e.to_string()),
        };
        self.advance(AuthStage::TokenObtained);

        let result = match self.api.verify_token(&token).await {
            Ok(result) => result,
            Err(e) => return self.fail(e.to_string()),
        };
        self.advance(AuthStage::Exchanged);

        if !result.success {
            let error = result.error.unwrap_or_else(|| "unknown error".to_string());
            return self.fail(format!("{}{}", LOGIN_FAILED_PREFIX, error));
        }

        match result.redirect {
            Some(location) => {
                tracing::info!(uid = %identity.uid, redirect = %location, "Signed in");
                self.advance(AuthStage::Redirected);
                self.page.navigate(&location);
                FlowOutcome::Redirected(location)
            }
            None => self.fail(
                ClientError::MalformedResponse("missing redirect".to_string()).to_string(),
            ),
        }
    }

    fn fail(&self, message: String) -> FlowOutcome {
        tracing::warn!(error = %message, "Sign-in failed");
        self.advance(AuthStage::Errored);
        self.page.alert(&message);
        FlowOutcome::Failed(message)
    }
}
