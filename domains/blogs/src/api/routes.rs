//! Route definitions for Blogs domain API

use axum::{
    routing::{delete, get, post},
    Router,
};
use scriptly_common::GENERATE_ENDPOINT;

use super::handlers::{blogs, categories};
use super::middleware::BlogsState;

/// Create all Blogs domain API routes
pub fn routes() -> Router<BlogsState> {
    Router::new()
        .route(GENERATE_ENDPOINT, post(blogs::generate_blog))
        .route("/api/blogs/{id}", get(blogs::get_blog))
        .route(
            "/api/submit_for_review/{id}",
            post(blogs::submit_for_review),
        )
        .route("/api/update_status/{id}", post(blogs::update_status))
        .route("/api/delete_blog/{id}", delete(blogs::delete_blog))
        .route("/api/update_draft/{id}", post(blogs::update_draft))
        .route("/api/drafts", get(blogs::list_drafts))
        .route("/api/approval", get(blogs::list_approval))
        .route("/api/dashboard", get(blogs::dashboard))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/edit_category/{id}", post(categories::edit_category))
        .route(
            "/api/delete_category/{id}",
            delete(categories::delete_category),
        )
}
