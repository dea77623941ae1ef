//! Repository implementations for Blogs domain

pub mod activities;
pub mod blogs;
pub mod categories;

pub use activities::ActivityRepository;
pub use blogs::BlogRepository;
pub use categories::CategoryRepository;

/// Combined repository access for the Blogs domain
#[derive(Clone, Default)]
pub struct BlogsRepositories {
    pub blogs: BlogRepository,
    pub categories: CategoryRepository,
    pub activities: ActivityRepository,
}

impl BlogsRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}
