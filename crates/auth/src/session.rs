//! Session cookie handling

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::claims::SessionClaims;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "scriptly_session";

/// Logged-in user attached to a request
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub user_name: String,
    pub email: Option<String>,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            user_name: claims.name,
            email: claims.email,
        }
    }
}

/// Cookie carrying a signed session
pub fn session_cookie(token: String, ttl_secs: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs.min(i64::MAX as u64) as i64))
        .build()
}

/// Cookie identity to pass to `CookieJar::remove`; name and path must match
/// the issued cookie for the browser to drop it
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Session cookie value from the request's `Cookie` headers
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
