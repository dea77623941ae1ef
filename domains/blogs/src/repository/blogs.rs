//! Blog repository (in-memory)

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use scriptly_common::{Error, Result};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Blog, BlogContent, BlogPage, BlogStatus, PAGE_SIZE};
use crate::domain::state::{BlogEvent, BlogStateMachine};

#[derive(Clone, Default)]
pub struct BlogRepository {
    blogs: Arc<RwLock<HashMap<Uuid, Blog>>>,
}

impl BlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find blog by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Blog>> {
        Ok(self.blogs.read().await.get(&id).cloned())
    }

    pub async fn create(&self, blog: &Blog) -> Result<Blog> {
        let mut blogs = self.blogs.write().await;
        if blogs.contains_key(&blog.id) {
            return Err(Error::Conflict(format!("Blog {} already exists", blog.id)));
        }
        blogs.insert(blog.id, blog.clone());
        Ok(blog.clone())
    }

    /// Apply a workflow event under the write lock
    pub async fn transition(&self, id: Uuid, event: BlogEvent) -> Result<Blog> {
        let mut blogs = self.blogs.write().await;
        let blog = blogs
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Blog not found".to_string()))?;

        blog.status = BlogStateMachine::transition(blog.status, event)?;
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    /// Replace a blog's body; a blog under review goes back to drafts
    pub async fn update_content(&self, id: Uuid, content: BlogContent) -> Result<Blog> {
        let mut blogs = self.blogs.write().await;
        let blog = blogs
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Blog not found".to_string()))?;

        if blog.status != BlogStatus::Draft {
            blog.status = BlogStateMachine::transition(blog.status, BlogEvent::Reject)?;
        }
        blog.set_content(content);
        Ok(blog.clone())
    }

    /// Refile every blog under `from` as `to`; returns how many moved
    pub async fn recategorize(&self, from: &str, to: &str) -> Result<usize> {
        let mut moved = 0;
        for blog in self.blogs.write().await.values_mut() {
            if blog.category == from {
                blog.category = to.to_string();
                moved += 1;
            }
        }
        Ok(moved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Blog>> {
        Ok(self.blogs.write().await.remove(&id))
    }

    /// Blogs in a status, newest first
    pub async fn list_by_status(&self, status: BlogStatus) -> Result<Vec<Blog>> {
        let mut blogs: Vec<Blog> = self
            .blogs
            .read()
            .await
            .values()
            .filter(|b| b.status == status)
            .cloned()
            .collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }

    /// One listing page of blogs in a status, most recently updated first
    pub async fn page(&self, status: BlogStatus, page: usize) -> Result<BlogPage> {
        let mut blogs = self.list_by_status(status).await?;
        blogs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(BlogPage::slice(blogs, page, PAGE_SIZE))
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.blogs.read().await.len())
    }
}
