//! Identity provider seam
//!
//! The auth handoff only needs an identity and its ID token; where they come
//! from (browser SDK, Identity Toolkit REST, a test double) is behind
//! [`IdentityProvider`].

use thiserror::Error;

/// Federated sign-in providers offered on the login/signup pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl std::fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FederatedProvider::Google => write!(f, "Google"),
        }
    }
}

/// Email/password pair typed into the auth form
#[derive(Clone, PartialEq, Eq)]
pub struct EmailCredential {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for EmailCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailCredential")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Signed-in user as reported by the provider
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub(crate) id_token: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            id_token: id_token.into(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("id_token", &"[REDACTED]")
            .finish()
    }
}

/// Provider failures. Display text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Message reported by the provider, verbatim
    #[error("{0}")]
    Provider(String),

    #[error("{0} sign-in needs a browser popup and is not available here")]
    Unsupported(FederatedProvider),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected identity provider response: {0}")]
    MalformedResponse(String),
}

/// Sign-in operations of an identity provider
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_popup(&self, provider: FederatedProvider)
        -> Result<Identity, IdentityError>;

    async fn sign_in_with_password(
        &self,
        credential: &EmailCredential,
    ) -> Result<Identity, IdentityError>;

    async fn create_user(&self, credential: &EmailCredential) -> Result<Identity, IdentityError>;

    async fn update_display_name(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Result<Identity, IdentityError>;

    /// Current ID token of the identity
    async fn id_token(&self, identity: &Identity) -> Result<String, IdentityError> {
        if identity.id_token.is_empty() {
            return Err(IdentityError::MalformedResponse(
                "identity carries no ID token".to_string(),
            ));
        }
        Ok(identity.id_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let identity = Identity::new("uid-1", "secret-token").with_email("a@b.com");
        let credential = EmailCredential {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };

        assert!(!format!("{:?}", identity).contains("secret-token"));
        assert!(!format!("{:?}", credential).contains("hunter2"));
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        let err = IdentityError::Provider("EMAIL_EXISTS".to_string());
        assert_eq!(err.to_string(), "EMAIL_EXISTS");
    }
}
