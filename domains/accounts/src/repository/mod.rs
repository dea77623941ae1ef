//! Repository implementations for Accounts domain

pub mod users;

pub use users::UserRepository;

/// Combined repository access for the Accounts domain
#[derive(Clone, Default)]
pub struct AccountsRepositories {
    pub users: UserRepository,
}

impl AccountsRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}
