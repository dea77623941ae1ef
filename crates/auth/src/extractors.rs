//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::session::Session;

/// Logged-in user extractor (session cookie)
#[derive(Debug)]
pub struct SessionUser(pub Session);

impl<S> FromRequestParts<S> for SessionUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let session = backend.session_from_headers(&parts.headers)?;
        Ok(SessionUser(session))
    }
}

/// Routes without a session fall through to handlers that can redirect
impl<S> axum::extract::OptionalFromRequestParts<S> for SessionUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Option<Self>, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        Ok(backend.session_from_headers(&parts.headers).ok().map(SessionUser))
    }
}
