//! Blog generation pipeline
//!
//! Three model calls per blog: an outline for the topic, the full post
//! expanded from that outline, then a category picked against the
//! categories already in use. Only the category step is allowed to fail
//! softly.

use std::sync::Arc;

use scriptly_llm::{LlmError, LlmService};

use crate::domain::entities::{title_from_prompt, BlogContent};

/// Category assigned when the model cannot classify a post
pub const FALLBACK_CATEGORY: &str = "General";

/// Longest answer accepted as a category name
const MAX_CATEGORY_LEN: usize = 64;

/// Characters of the post shown to the classifier
const CATEGORY_EXCERPT_CHARS: usize = 1500;

/// Everything the pipeline produces for one prompt
#[derive(Debug, Clone, PartialEq)]
pub struct BlogDraft {
    pub title: String,
    pub outline: Vec<String>,
    pub content: BlogContent,
    pub category: String,
    pub model_used: String,
}

#[derive(Clone)]
pub struct BlogPipeline {
    llm: Arc<dyn LlmService>,
}

impl BlogPipeline {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    /// Run all steps for a prompt
    pub async fn run(&self, prompt: &str, existing_categories: &[String]) -> Result<BlogDraft, LlmError> {
        let outline = self.outline(prompt).await?;
        tracing::debug!(sections = outline.len(), "Outline generated");

        let (content, model_used) = self.content(&outline).await?;
        tracing::debug!(words = content.word_count(), "Content generated");

        let title = title_from_prompt(prompt);
        let category = self
            .categorize(&title, &content.markdown, existing_categories)
            .await;

        Ok(BlogDraft {
            title,
            outline,
            content,
            category,
            model_used,
        })
    }

    /// Outline sections, one per non-empty line of the answer
    pub async fn outline(&self, topic: &str) -> Result<Vec<String>, LlmError> {
        let prompt = format!(
            "Create a structured SEO blog outline for: {topic}. Return ONLY a JSON list of strings."
        );
        let completion = self.llm.generate(&prompt).await?;

        let outline: Vec<String> = completion
            .text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if outline.is_empty() {
            return Err(LlmError::Response(
                "Outline generation returned no sections".to_string(),
            ));
        }
        Ok(outline)
    }

    /// Full post expanded from the outline, with the model that wrote it
    pub async fn content(&self, outline: &[String]) -> Result<(BlogContent, String), LlmError> {
        let prompt = format!(
            "You are an expert copywriter. Expand the following outline into a \
             comprehensive, engaging blog post (approx 1200 words). \
             Use Markdown for structure, including bold text for emphasis and \
             bullet points for readability. \n\nOUTLINE:\n{}",
            outline.join("\n")
        );
        let completion = self.llm.generate(&prompt).await?;

        if completion.text.trim().is_empty() {
            return Err(LlmError::Response(
                "Content generation returned no text".to_string(),
            ));
        }
        Ok((BlogContent::from_markdown(completion.text), completion.model))
    }

    /// Category name for a post; never fails
    pub async fn categorize(&self, title: &str, markdown: &str, existing: &[String]) -> String {
        let existing = if existing.is_empty() {
            "None".to_string()
        } else {
            existing.join(", ")
        };
        let excerpt: String = markdown.chars().take(CATEGORY_EXCERPT_CHARS).collect();

        let prompt = format!(
            "Role: Senior Content Taxonomist.\n\
             Task: Categorize the following blog post.\n\n\
             Existing Categories: {existing}\n\n\
             Blog Title: {title}\n\
             Blog Content: {excerpt}\n\n\
             Instructions:\n\
             1. If a category in 'Existing Categories' fits perfectly, use it.\n\
             2. If none fit, create a new, professional 1-2 word category.\n\
             3. Return ONLY the category name. No quotes, no explanation."
        );

        match self.llm.generate(&prompt).await {
            Ok(completion) => clean_category(&completion.text).unwrap_or_else(|| {
                tracing::warn!(answer = %completion.text, "Unusable category answer");
                FALLBACK_CATEGORY.to_string()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Categorization failed");
                FALLBACK_CATEGORY.to_string()
            }
        }
    }
}

/// First line of the answer without decoration
fn clean_category(answer: &str) -> Option<String> {
    let name = answer
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '*' | '`' | '.'))
        .trim();

    if name.is_empty() || name.chars().count() > MAX_CATEGORY_LEN {
        return None;
    }
    Some(name.to_string())
}
