//! Driving port for settings updates.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfileUpdate};

/// Domain use-case port for editing one's own profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply `update` to the user and return the stored result.
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, Error>;
}
