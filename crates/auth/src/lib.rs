//! Authentication for the Scriptly server
//!
//! Verifies Firebase ID tokens posted by the login/signup pages, turns them
//! into signed session cookies, and provides axum extractors that work with
//! any domain state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod jwt;
mod keys;
mod session;

pub use backend::AuthBackend;
pub use claims::{FirebaseClaims, SessionClaims};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::SessionUser;
pub use keys::{KeySource, GOOGLE_JWKS_URL};
pub use session::{clear_session_cookie, session_cookie, Session, SESSION_COOKIE};
