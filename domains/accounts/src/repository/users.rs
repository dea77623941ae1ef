//! User repository (in-memory)

use std::collections::HashMap;
use std::sync::Arc;

use scriptly_common::Result;
use tokio::sync::RwLock;

use crate::domain::entities::{User, UserProfile};

#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find user by Firebase uid
    pub async fn find(&self, uid: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(uid).cloned())
    }

    /// Create the user on first sign-in, refresh it afterwards
    pub async fn upsert(&self, profile: &UserProfile) -> Result<User> {
        let mut users = self.users.write().await;
        let user = users
            .entry(profile.uid.clone())
            .and_modify(|user| user.record_login(profile))
            .or_insert_with(|| User::new(profile));
        Ok(user.clone())
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.users.read().await.len())
    }
}
