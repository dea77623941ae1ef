//! Domain entities for the Scriptly blogs domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when the prompt has nothing to title-case
pub const UNTITLED_BLOG: &str = "New AI Blog";

/// Blogs per page in the drafts and approval listings
pub const PAGE_SIZE: usize = 10;

/// Blog workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlogStatus {
    #[default]
    Draft,
    UnderReview,
    Published,
}

impl BlogStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [BlogStatus] {
        match self {
            Self::Draft => &[Self::UnderReview],
            Self::UnderReview => &[Self::Published, Self::Draft],
            Self::Published => &[],
        }
    }
}

impl std::fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlogStatus::Draft => write!(f, "DRAFT"),
            BlogStatus::UnderReview => write!(f, "UNDER_REVIEW"),
            BlogStatus::Published => write!(f, "PUBLISHED"),
        }
    }
}

/// Generated body in both renderings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogContent {
    pub markdown: String,
    pub html: String,
}

impl BlogContent {
    /// Wrap the model's Markdown for direct display
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        let markdown = markdown.into();
        let html = format!("<article>{}</article>", markdown.replace('\n', "<br>"));
        Self { markdown, html }
    }

    pub fn word_count(&self) -> usize {
        self.markdown.split_whitespace().count()
    }
}

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub outline: Vec<String>,
    pub content: BlogContent,
    pub category: String,
    pub status: BlogStatus,
    pub author_id: String,
    pub word_count: usize,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(
        title: String,
        outline: Vec<String>,
        content: BlogContent,
        category: String,
        author_id: String,
        model_used: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            word_count: content.word_count(),
            outline,
            content,
            category,
            status: BlogStatus::Draft,
            author_id,
            model_used,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the body, keeping both renderings and the word count in step
    pub fn set_content(&mut self, content: BlogContent) {
        self.word_count = content.word_count();
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// One page of a blog listing, newest update first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPage {
    pub blogs: Vec<Blog>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl BlogPage {
    /// Cut page `page` (1-based, clamped to 1) out of `blogs`
    pub fn slice(blogs: Vec<Blog>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let current_page = page.max(1);
        let total_count = blogs.len();
        let total_pages = total_count.div_ceil(per_page);

        let blogs = blogs
            .into_iter()
            .skip((current_page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Self {
            blogs,
            current_page,
            total_pages,
            total_count,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }
}

/// Title-case a prompt word by word: the first letter of every run of
/// letters is upper-cased, the rest lower-cased.
pub fn title_from_prompt(prompt: &str) -> String {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return UNTITLED_BLOG.to_string();
    }

    let mut title = String::with_capacity(prompt.len());
    let mut in_word = false;
    for c in prompt.chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}

/// Category with the number of blogs filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub count: u64,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            count: 0,
        }
    }
}

/// Kind of dashboard activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Generated,
    ReviewRequested,
    Published,
    Edited,
    Deleted,
}

/// Dashboard activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub action_text: String,
    pub blog_title: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        user: impl Into<String>,
        kind: ActivityKind,
        action_text: impl Into<String>,
        blog_title: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: user.into(),
            kind,
            action_text: action_text.into(),
            blog_title: blog_title.into(),
            timestamp: Utc::now(),
        }
    }
}
