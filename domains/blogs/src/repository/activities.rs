//! Activity feed repository (in-memory)
//!
//! Only the newest `ACTIVITY_LOG_CAPACITY` entries are kept.

use std::collections::VecDeque;
use std::sync::Arc;

use scriptly_common::Result;
use tokio::sync::RwLock;

use crate::domain::entities::Activity;

/// Entries retained before the oldest are dropped
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

#[derive(Clone, Default)]
pub struct ActivityRepository {
    entries: Arc<RwLock<VecDeque<Activity>>>,
}

impl ActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn log(&self, activity: Activity) -> Result<()> {
        tracing::debug!(
            kind = ?activity.kind,
            blog_title = %activity.blog_title,
            "Activity logged"
        );
        let mut entries = self.entries.write().await;
        entries.push_back(activity);
        while entries.len() > ACTIVITY_LOG_CAPACITY {
            entries.pop_front();
        }
        Ok(())
    }

    /// Most recent entries first
    pub async fn recent(&self, limit: usize) -> Result<Vec<Activity>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
