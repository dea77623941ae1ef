//! Scriptly client flows
//!
//! The page-side behavior of the app, independent of any rendering host:
//! - `generation`: prompt → `POST /api/generate` → redirect or alert
//! - `nav`: sidebar active-link highlighting
//! - `auth`: identity-provider sign-in handed off to `/api/auth/verify`
//! - `dispatch`: click routing by element role
//!
//! Hosts implement [`Page`]; backends and identity providers sit behind
//! [`ScriptlyApi`] and [`IdentityProvider`].

pub mod auth;
pub mod backend;
pub mod dispatch;
pub mod error;
pub mod firebase;
pub mod generation;
pub mod identity;
pub mod mock;
pub mod nav;
pub mod outcome;
pub mod page;

pub use auth::{AuthForm, AuthHandoff, AuthStage};
pub use backend::{HttpBackend, ScriptlyApi};
pub use dispatch::{resolve_role, ClickDispatcher, ClickDisposition, Element, ElementRole};
pub use error::ClientError;
pub use firebase::FirebaseIdentity;
pub use generation::{GenerationTrigger, DEFAULT_USER_ID, EMPTY_PROMPT_ALERT};
pub use identity::{EmailCredential, FederatedProvider, Identity, IdentityError, IdentityProvider};
pub use nav::highlight_active_links;
pub use outcome::FlowOutcome;
pub use page::{ControlState, Page};
