//! Blog generation and review workflow handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use scriptly_auth::SessionUser;
use scriptly_common::{Error, GenerateRequest, GenerationResult, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::middleware::BlogsState;
use crate::domain::entities::{
    Activity, ActivityKind, Blog, BlogContent, BlogPage, BlogStatus, Category,
};
use crate::domain::state::BlogEvent;

/// Entries shown in the dashboard activity feed
const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Where a freshly generated blog is reviewed
fn landing_page(status: BlogStatus) -> &'static str {
    match status {
        BlogStatus::UnderReview => "/approval",
        _ => "/drafts",
    }
}

/// Response of the workflow actions
#[derive(Debug, Serialize)]
pub struct BlogActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: BlogStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDraftRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// `?page=` of the listings
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// Requested page; anything unreadable means the first page
fn page_number(query: std::result::Result<Query<PageQuery>, QueryRejection>) -> usize {
    query.ok().and_then(|Query(q)| q.page).unwrap_or(1)
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_blogs: usize,
    pub drafts: usize,
    pub pending: usize,
    pub categories: Vec<Category>,
    pub recent_activity: Vec<Activity>,
}

fn parse_blog_id(raw: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|_| Error::NotFound("Blog not found".to_string()))
}

/// Run the generation pipeline for a prompt and store the result
pub async fn generate_blog(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    ValidatedJson(request): ValidatedJson<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerationResult>)> {
    if !request.user_id.is_empty() && request.user_id != session.user_id {
        tracing::debug!(
            claimed = %request.user_id,
            uid = %session.user_id,
            "Ignoring client user_id in favor of the session"
        );
    }

    let existing = state.repos.categories.names().await?;
    let draft = state
        .pipeline
        .run(&request.prompt, &existing)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Blog generation failed"))?;

    let mut blog = Blog::new(
        draft.title,
        draft.outline,
        draft.content,
        draft.category,
        session.user_id.clone(),
        draft.model_used,
    );
    if request.auto_submit {
        blog.status = BlogStatus::UnderReview;
    }

    let blog = state.repos.blogs.create(&blog).await?;
    state.repos.categories.increment(&blog.category).await?;
    state
        .repos
        .activities
        .log(Activity::new(
            &session.user_name,
            ActivityKind::Generated,
            format!("generated a blog in {}", blog.category),
            &blog.title,
        ))
        .await?;

    tracing::info!(
        blog_id = %blog.id,
        category = %blog.category,
        status = %blog.status,
        words = blog.word_count,
        "Blog generated"
    );

    Ok((
        StatusCode::CREATED,
        Json(GenerationResult::created(
            blog.id.to_string(),
            landing_page(blog.status),
        )),
    ))
}

/// Get a single blog by ID
pub async fn get_blog(
    SessionUser(_): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>> {
    let id = parse_blog_id(&id)?;
    let blog = state
        .repos
        .blogs
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Blog not found".to_string()))?;
    Ok(Json(blog))
}

/// Move a draft into the approval queue
pub async fn submit_for_review(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
) -> Result<Json<BlogActionResponse>> {
    let id = parse_blog_id(&id)?;
    let blog = state.repos.blogs.transition(id, BlogEvent::Submit).await?;

    state
        .repos
        .activities
        .log(Activity::new(
            &session.user_name,
            ActivityKind::ReviewRequested,
            "submitted for approval",
            &blog.title,
        ))
        .await?;

    tracing::info!(blog_id = %blog.id, "Blog submitted for review");
    Ok(Json(BlogActionResponse {
        success: true,
        status: Some(blog.status),
        redirect: Some("/dashboard".to_string()),
    }))
}

/// Approve, reject back to drafts, or submit, by target status
pub async fn update_status(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<BlogActionResponse>> {
    let id = parse_blog_id(&id)?;
    let Json(request) = body.map_err(|e| Error::Validation(e.body_text()))?;

    let blog = state
        .repos
        .blogs
        .transition(id, BlogEvent::toward(request.status))
        .await?;

    let (kind, action_text) = match blog.status {
        BlogStatus::Draft => (ActivityKind::Edited, "rejected back to drafts"),
        BlogStatus::UnderReview => (ActivityKind::ReviewRequested, "submitted for approval"),
        BlogStatus::Published => (ActivityKind::Published, "approved for publication"),
    };
    state
        .repos
        .activities
        .log(Activity::new(&session.user_name, kind, action_text, &blog.title))
        .await?;

    tracing::info!(blog_id = %blog.id, status = %blog.status, "Blog status updated");
    Ok(Json(BlogActionResponse {
        success: true,
        status: Some(blog.status),
        redirect: None,
    }))
}

/// Permanently remove a blog
pub async fn delete_blog(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
) -> Result<Json<BlogActionResponse>> {
    let id = parse_blog_id(&id)?;
    let blog = state
        .repos
        .blogs
        .delete(id)
        .await?
        .ok_or_else(|| Error::NotFound("Blog not found".to_string()))?;

    state.repos.categories.decrement(&blog.category).await?;
    state
        .repos
        .activities
        .log(Activity::new(
            &session.user_name,
            ActivityKind::Deleted,
            "permanently deleted",
            &blog.title,
        ))
        .await?;

    tracing::info!(blog_id = %blog.id, "Blog deleted");
    Ok(Json(BlogActionResponse {
        success: true,
        status: None,
        redirect: None,
    }))
}

/// Drafts, most recently updated first
pub async fn list_drafts(
    SessionUser(_): SessionUser,
    State(state): State<BlogsState>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<BlogPage>> {
    let page = page_number(query);
    Ok(Json(state.repos.blogs.page(BlogStatus::Draft, page).await?))
}

/// Approval queue: blogs under review
pub async fn list_approval(
    SessionUser(_): SessionUser,
    State(state): State<BlogsState>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<BlogPage>> {
    let page = page_number(query);
    Ok(Json(state.repos.blogs.page(BlogStatus::UnderReview, page).await?))
}

/// Save an edited body; blogs under review return to drafts
pub async fn update_draft(
    SessionUser(session): SessionUser,
    State(state): State<BlogsState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateDraftRequest>, JsonRejection>,
) -> Result<Json<BlogActionResponse>> {
    let id = parse_blog_id(&id)?;
    let Json(request) = body.map_err(|e| Error::Validation(e.body_text()))?;
    let markdown = request
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| Error::Validation("Content is required".to_string()))?;

    let blog = state
        .repos
        .blogs
        .update_content(id, BlogContent::from_markdown(markdown))
        .await?;

    state
        .repos
        .activities
        .log(Activity::new(
            &session.user_name,
            ActivityKind::Edited,
            "edited the draft",
            &blog.title,
        ))
        .await?;

    tracing::info!(blog_id = %blog.id, words = blog.word_count, "Draft updated");
    Ok(Json(BlogActionResponse {
        success: true,
        status: Some(blog.status),
        redirect: None,
    }))
}

/// Counts and recent activity for the dashboard
pub async fn dashboard(
    SessionUser(_): SessionUser,
    State(state): State<BlogsState>,
) -> Result<Json<DashboardResponse>> {
    let repos = &state.repos;
    Ok(Json(DashboardResponse {
        total_blogs: repos.blogs.count().await?,
        drafts: repos.blogs.list_by_status(BlogStatus::Draft).await?.len(),
        pending: repos.blogs.list_by_status(BlogStatus::UnderReview).await?.len(),
        categories: repos.categories.list().await?,
        recent_activity: repos.activities.recent(RECENT_ACTIVITY_LIMIT).await?,
    }))
}
