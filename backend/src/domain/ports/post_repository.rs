//! Port for post and comment storage.
//!
//! Feed order is newest first: [`PostRepository::prepend`] places a post at
//! the head of the feed regardless of its timestamp.

use async_trait::async_trait;

use crate::domain::{Comment, Error, Post, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// Mutation targeted a post that does not exist.
        Missing { id: String } => "post not found: {id}",
    }
}

impl From<PostRepositoryError> for Error {
    fn from(err: PostRepositoryError) -> Self {
        match err {
            PostRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("post repository unavailable: {message}"))
            }
            PostRepositoryError::Query { message } => {
                Error::internal(format!("post repository error: {message}"))
            }
            PostRepositoryError::Missing { id } => {
                Error::not_found(format!("post not found: {id}"))
            }
        }
    }
}

/// Storage for posts and their comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first.
    async fn list_feed(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts by one artist, in feed order.
    async fn list_by_artist(&self, artist_id: &UserId) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch a single post.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Place a post at the head of the feed and return the stored copy.
    ///
    /// The stored fan count is re-read from the author's record in the same
    /// write, so a post created during a fan toggle never keeps a stale copy.
    async fn prepend(&self, post: &Post) -> Result<Post, PostRepositoryError>;

    /// Append a comment to a post.
    async fn append_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> Result<(), PostRepositoryError>;

    /// Overwrite the fan count copy on every post by `artist_id`.
    ///
    /// Returns how many posts were rewritten.
    async fn sync_artist_fan_count(
        &self,
        artist_id: &UserId,
        fan_count: u64,
    ) -> Result<usize, PostRepositoryError>;
}
