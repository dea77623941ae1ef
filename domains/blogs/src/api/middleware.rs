//! Blogs domain state and auth backend integration

use crate::{BlogPipeline, BlogsRepositories};
use axum::extract::FromRef;
use scriptly_auth::AuthBackend;

/// Application state for the Blogs domain
#[derive(Clone)]
pub struct BlogsState {
    pub repos: BlogsRepositories,
    pub auth: AuthBackend,
    pub pipeline: BlogPipeline,
}

impl FromRef<BlogsState> for AuthBackend {
    fn from_ref(state: &BlogsState) -> Self {
        state.auth.clone()
    }
}
