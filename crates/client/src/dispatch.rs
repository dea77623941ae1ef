//! Click routing by element role
//!
//! A click is described by the element that was hit and its ancestors, the
//! target first. One lookup over that chain decides which handler, if any,
//! takes the event.

use std::sync::Arc;

use crate::auth::{AuthForm, AuthHandoff};
use crate::outcome::FlowOutcome;
use crate::page::dom;

/// Element on a click path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// What a clicked element does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    GoogleSignIn,
    GoogleSignUp,
    Logout,
    NavLink,
}

impl ElementRole {
    /// Role carried by this element alone
    pub fn of(element: &Element) -> Option<Self> {
        if element.has_class(dom::LOGOUT_CLASS) {
            return Some(ElementRole::Logout);
        }
        match element.id.as_deref() {
            Some(dom::GOOGLE_SIGN_IN) => return Some(ElementRole::GoogleSignIn),
            Some(dom::GOOGLE_SIGN_UP) => return Some(ElementRole::GoogleSignUp),
            _ => {}
        }
        if element.has_class(dom::NAV_LINK_CLASS) {
            return Some(ElementRole::NavLink);
        }
        None
    }
}

/// Role of a click path: `Logout` anywhere wins, then the closest Google
/// button, then a nav link
pub fn resolve_role(path: &[Element]) -> Option<ElementRole> {
    let roles: Vec<ElementRole> = path.iter().filter_map(ElementRole::of).collect();
    if roles.contains(&ElementRole::Logout) {
        return Some(ElementRole::Logout);
    }
    roles
        .iter()
        .copied()
        .find(|role| matches!(role, ElementRole::GoogleSignIn | ElementRole::GoogleSignUp))
        .or_else(|| roles.first().copied())
}

/// What happened to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Default action suppressed; the handler ran to this outcome
    Intercepted(FlowOutcome),
    /// Left to the default action (follow the link, submit the form)
    PassThrough,
}

/// Routes page events to the sign-in handler
pub struct ClickDispatcher {
    auth: Option<Arc<AuthHandoff>>,
}

impl ClickDispatcher {
    /// `auth` is `None` on pages without sign-in configuration
    pub fn new(auth: Option<Arc<AuthHandoff>>) -> Self {
        Self { auth }
    }

    pub async fn click(&self, path: &[Element]) -> ClickDisposition {
        let role = resolve_role(path);
        tracing::debug!(role = ?role, "Click");

        match (role, &self.auth) {
            (Some(ElementRole::GoogleSignIn | ElementRole::GoogleSignUp), Some(auth)) => {
                ClickDisposition::Intercepted(auth.sign_in_with_google().await)
            }
            _ => ClickDisposition::PassThrough,
        }
    }

    pub async fn submit(&self, form: &AuthForm) -> ClickDisposition {
        match &self.auth {
            Some(auth) => ClickDisposition::Intercepted(auth.submit_form(form).await),
            None => ClickDisposition::PassThrough,
        }
    }
}
