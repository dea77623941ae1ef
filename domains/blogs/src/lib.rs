//! Blogs domain: AI blog generation, review workflow, categories, activity

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::pipeline::{BlogDraft, BlogPipeline, FALLBACK_CATEGORY};
pub use domain::state::{BlogEvent, BlogStateMachine, StateError};

// Re-export repository types
pub use repository::BlogsRepositories;

// Re-export API types
pub use api::routes;
pub use api::BlogsState;
