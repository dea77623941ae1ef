//! Domain entities for the Scriptly accounts domain

use chrono::{DateTime, Utc};
use scriptly_auth::FirebaseClaims;
use serde::{Deserialize, Serialize};

/// Name used when a token carries neither a name nor an email
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Profile data taken from a verified ID token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl UserProfile {
    pub fn from_claims(claims: &FirebaseClaims) -> Self {
        Self {
            uid: claims.sub.clone(),
            name: claims
                .display_name()
                .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string()),
            email: claims.email.clone(),
            picture: claims.picture.clone(),
        }
    }
}

/// User record, keyed by Firebase uid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl User {
    /// First sign-in
    pub fn new(profile: &UserProfile) -> Self {
        let now = Utc::now();
        Self {
            uid: profile.uid.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            profile_pic: profile.picture.clone(),
            created_at: now,
            last_login: now,
        }
    }

    /// Later sign-ins refresh the profile and login time
    pub fn record_login(&mut self, profile: &UserProfile) {
        self.name = profile.name.clone();
        self.email = profile.email.clone();
        self.profile_pic = profile.picture.clone();
        self.last_login = Utc::now();
    }
}
