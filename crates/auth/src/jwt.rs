//! JWT validation for ID tokens and session cookies

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{FirebaseClaims, SessionClaims};
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Validate a Firebase ID token against the project's issuer and audience
pub(crate) fn validate_id_token(
    token: &str,
    key: &DecodingKey,
    algorithm: Algorithm,
    config: &AuthConfig,
) -> Result<FirebaseClaims, AuthError> {
    let mut validation = Validation::new(algorithm);
    validation.set_audience(&[&config.project_id]);
    validation.set_issuer(&[config.issuer()]);
    validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

    let token_data = decode::<FirebaseClaims>(token, key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "ID token validation failed");
        AuthError::InvalidToken
    })?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(AuthError::InvalidUserId);
    }

    Ok(token_data.claims)
}

/// Sign session claims into the cookie value
pub(crate) fn encode_session(claims: &SessionClaims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to sign session");
        AuthError::SessionIssueFailed
    })
}

/// Validate a session cookie value
pub(crate) fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Session validation failed");
            AuthError::InvalidSession
        })
}
