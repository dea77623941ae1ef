//! Category management handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use scriptly_auth::SessionUser;
use scriptly_common::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::middleware::BlogsState;
use crate::domain::entities::{Activity, ActivityKind, Category};

#[derive(Debug, Deserialize)]
pub struct EditCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

fn parse_category_id(raw: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|_| Error::NotFound("Category not found".to_string()))
}

/// All categories with their blog counts
pub async fn list_categories(
    SessionUser(_): SessionUser,
    State(state): State<BlogsState>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.repos.categories.list().await?))
}

/// Rename a category; blogs filed under it follow
pub async fn edit_category(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<EditCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryActionResponse>> {
    let name = body
        .ok()
        .and_then(|Json(request)| request.name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::Validation("Name is required".to_string()))?;
    let id = parse_category_id(&id)?;

    let (previous, category) = state.repos.categories.rename(id, &name).await?;
    let moved = state
        .repos
        .blogs
        .recategorize(&previous, &category.name)
        .await?;

    state
        .repos
        .activities
        .log(Activity::new(
            &session.user_name,
            ActivityKind::Edited,
            "renamed a category to",
            &category.name,
        ))
        .await?;

    tracing::info!(
        category_id = %category.id,
        from = %previous,
        to = %category.name,
        blogs = moved,
        "Category renamed"
    );
    Ok(Json(CategoryActionResponse {
        success: true,
        category: Some(category),
    }))
}

/// Remove a category; its blogs keep the name they were filed under
pub async fn delete_category(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryActionResponse>> {
    let id = parse_category_id(&id)?;
    let category = state
        .repos
        .categories
        .remove(id)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

    state
        .repos
        .activities
        .log(Activity::new(
            &session.user_name,
            ActivityKind::Deleted,
            "deleted the category",
            &category.name,
        ))
        .await?;

    tracing::info!(category_id = %category.id, name = %category.name, "Category deleted");
    Ok(Json(CategoryActionResponse {
        success: true,
        category: None,
    }))
}
