//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims of a Firebase ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseClaims {
    /// Subject (Firebase user ID)
    pub sub: String,
    /// Audience (Firebase project ID)
    pub aud: String,
    /// Issuer (`https://securetoken.google.com/<project>`)
    pub iss: String,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    /// Display name (set for Google accounts and after a profile update)
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl FirebaseClaims {
    /// Name shown in the app: the token name, else the email local part
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|e| e.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
    }
}

/// Claims of the signed session cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (Firebase user ID)
    pub sub: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub iat: u64,
    pub exp: u64,
}
