//! Client-side errors

use thiserror::Error;

use crate::identity::IdentityError;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// The server answered with something other than the expected JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
