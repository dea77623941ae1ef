//! Route definitions for Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};
use scriptly_common::{VERIFY_ENDPOINT, WEB_CONFIG_ENDPOINT};

use super::handlers::auth;
use super::middleware::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route(VERIFY_ENDPOINT, post(auth::verify_token))
        .route(WEB_CONFIG_ENDPOINT, get(auth::web_config))
        .route("/logout", get(auth::logout))
}
