//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing ID token")]
    MissingToken,
    #[error("Invalid or expired ID token")]
    InvalidToken,
    #[error("ID token has no user ID")]
    InvalidUserId,
    #[error("Unable to load token signing keys")]
    KeyFetchFailed,
    #[error("Not logged in")]
    MissingSession,
    #[error("Session expired, please log in again")]
    InvalidSession,
    #[error("Failed to start session")]
    SessionIssueFailed,
}

impl AuthError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::InvalidUserId => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::KeyFetchFailed => (StatusCode::UNAUTHORIZED, "KEY_FETCH_FAILED"),
            AuthError::MissingSession => (StatusCode::UNAUTHORIZED, "MISSING_SESSION"),
            AuthError::InvalidSession => (StatusCode::UNAUTHORIZED, "INVALID_SESSION"),
            AuthError::SessionIssueFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SESSION_ERROR")
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for scriptly_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionIssueFailed => scriptly_common::Error::Internal(err.to_string()),
            other => scriptly_common::Error::Authentication(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidUserId, StatusCode::UNAUTHORIZED),
            (AuthError::KeyFetchFailed, StatusCode::UNAUTHORIZED),
            (AuthError::MissingSession, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidSession, StatusCode::UNAUTHORIZED),
            (
                AuthError::SessionIssueFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_auth_error_converts_to_common_error() {
        let err: scriptly_common::Error = AuthError::InvalidToken.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid or expired ID token");
    }
}
