//! Shared configuration, wire types, and error handling for Scriptly
//!
//! This crate provides common functionality used by both the server and the
//! client side of Scriptly:
//! - Configuration management following 12-factor principles
//! - Request/response bodies of the JSON action endpoints
//! - Error types and the `{success, error}` response envelope
//! - State machine error types

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;
pub mod wire;

pub use config::{Config, FirebaseWebConfig};
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use state::StateError;
pub use wire::{
    GenerateRequest, GenerationResult, SessionExchangeResult, VerifyTokenRequest,
    GENERATE_ENDPOINT, VERIFY_ENDPOINT, WEB_CONFIG_ENDPOINT,
};
