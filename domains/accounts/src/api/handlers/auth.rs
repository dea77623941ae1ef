//! Sign-in handoff and logout handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Redirect},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use scriptly_auth::{clear_session_cookie, session_cookie, AuthError, Session};
use scriptly_common::{FirebaseWebConfig, SessionExchangeResult, VerifyTokenRequest};

use crate::api::middleware::AccountsState;
use crate::domain::entities::UserProfile;

/// Where a fresh session lands
pub const AFTER_LOGIN_REDIRECT: &str = "/dashboard";

/// Where logout lands
pub const AFTER_LOGOUT_REDIRECT: &str = "/login";

/// Exchange a Firebase ID token for a session cookie
pub async fn verify_token(
    State(state): State<AccountsState>,
    jar: CookieJar,
    body: Result<Json<VerifyTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable token exchange body");
        AuthError::MissingToken
    })?;

    let claims = state
        .auth
        .verify_id_token(&request.id_token)
        .await
        .inspect_err(|e| tracing::info!(error = %e, "ID token rejected"))?;

    let profile = UserProfile::from_claims(&claims);
    let user = state.repos.users.upsert(&profile).await.map_err(|e| {
        tracing::error!(error = %e, uid = %profile.uid, "Failed to save user");
        AuthError::SessionIssueFailed
    })?;

    let session = Session {
        user_id: user.uid,
        user_name: user.name,
        email: user.email,
    };
    let token = state.auth.issue_session(&session)?;
    let cookie = session_cookie(token, state.auth.config().session_ttl_secs);

    tracing::info!(uid = %session.user_id, "Session started");

    Ok((
        jar.add(cookie),
        Json(SessionExchangeResult::redirect(AFTER_LOGIN_REDIRECT)),
    ))
}

/// Public web SDK configuration, as embedded in the login/signup pages
pub async fn web_config(State(state): State<AccountsState>) -> Json<FirebaseWebConfig> {
    Json(state.firebase)
}

/// Drop the session and go back to the login page
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(clear_session_cookie()), Redirect::to(AFTER_LOGOUT_REDIRECT))
}
