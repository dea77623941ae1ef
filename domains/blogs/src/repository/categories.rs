//! Category repository (in-memory)

use std::collections::HashMap;
use std::sync::Arc;

use scriptly_common::{Error, Result};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Category;

#[derive(Clone, Default)]
pub struct CategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl CategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category names, sorted
    pub async fn names(&self) -> Result<Vec<String>> {
        Ok(self.list().await?.into_iter().map(|c| c.name).collect())
    }

    /// All categories, sorted by name
    pub async fn list(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.categories.read().await.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    /// Count one more blog under `name`, creating the category if needed
    pub async fn increment(&self, name: &str) -> Result<Category> {
        let mut categories = self.categories.write().await;
        let id = categories
            .values()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .unwrap_or_else(Uuid::new_v4);

        let category = categories
            .entry(id)
            .or_insert_with(|| Category { id, ..Category::new(name) });
        category.count += 1;
        Ok(category.clone())
    }

    /// Count one blog fewer; the category stays even at zero
    pub async fn decrement(&self, name: &str) -> Result<()> {
        if let Some(category) = self
            .categories
            .write()
            .await
            .values_mut()
            .find(|c| c.name == name)
        {
            category.count = category.count.saturating_sub(1);
        }
        Ok(())
    }

    /// Give a category a new name; returns the old name and the renamed category
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<(String, Category)> {
        let mut categories = self.categories.write().await;
        if categories.values().any(|c| c.id != id && c.name == name) {
            return Err(Error::Conflict(format!("Category {name} already exists")));
        }

        let category = categories
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;
        let previous = std::mem::replace(&mut category.name, name.to_string());
        Ok((previous, category.clone()))
    }

    pub async fn remove(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.categories.write().await.remove(&id))
    }
}
