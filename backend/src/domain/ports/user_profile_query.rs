//! Driving port for user profile reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for loading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the user, or `None` when the id is unknown.
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, Error>;
}
