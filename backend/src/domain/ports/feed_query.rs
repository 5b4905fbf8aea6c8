//! Driving port for feed reads.

use async_trait::async_trait;

use crate::domain::{Error, Post, UserId};

/// Domain use-case port for reading posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Every post, newest first.
    async fn feed(&self) -> Result<Vec<Post>, Error>;

    /// Posts by one artist.
    async fn artist_posts(&self, artist_id: &UserId) -> Result<Vec<Post>, Error>;
}
