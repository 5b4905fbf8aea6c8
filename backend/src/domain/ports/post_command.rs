//! Driving port for publishing posts and comments.

use async_trait::async_trait;

use crate::domain::{Comment, CommentText, Error, NewPost, Post, PostId, UserId};

/// Domain use-case port for authoring content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish a post at the head of the feed.
    async fn create_post(&self, author_id: &UserId, draft: NewPost) -> Result<Post, Error>;

    /// Append a comment to a post.
    async fn add_comment(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        text: CommentText,
    ) -> Result<Comment, Error>;
}
