//! Driving port for the demo login flow.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! resolve a username into a user without knowing the backing storage.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Domain use-case port for logging in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the user whose username matches case-insensitively, creating a
    /// new artist account when none does.
    async fn login(&self, username: &Username) -> Result<User, Error>;
}
