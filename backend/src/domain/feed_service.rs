//! Feed service: reading the feed and publishing posts and comments.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{FeedQuery, PostCommand, PostRepository, UserRepository};
use crate::domain::{Comment, CommentId, CommentText, Error, NewPost, Post, PostId, User, UserId};

/// Service implementing [`FeedQuery`] and [`PostCommand`].
#[derive(Clone)]
pub struct FeedService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> FeedService<P, U> {
    /// Create a new service.
    pub fn new(posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

impl<P, U> FeedService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn require_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user not found: {user_id}")))
    }
}

#[async_trait]
impl<P, U> FeedQuery for FeedService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn feed(&self) -> Result<Vec<Post>, Error> {
        Ok(self.posts.list_feed().await?)
    }

    async fn artist_posts(&self, artist_id: &UserId) -> Result<Vec<Post>, Error> {
        Ok(self.posts.list_by_artist(artist_id).await?)
    }
}

#[async_trait]
impl<P, U> PostCommand for FeedService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, author_id: &UserId, draft: NewPost) -> Result<Post, Error> {
        let author = self.require_user(author_id).await?;
        if !author.is_artist() {
            return Err(Error::forbidden("only artists can publish posts"));
        }

        let post = Post::publish(PostId::random(), draft, &author, self.clock.utc());
        let post = self.posts.prepend(&post).await?;
        info!(post_id = %post.id, artist_id = %author_id, "post published");
        Ok(post)
    }

    async fn add_comment(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        let author = self.require_user(author_id).await?;
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(Error::not_found(format!("post not found: {post_id}")));
        }

        let comment = Comment {
            id: CommentId::random(),
            user_id: author_id.clone(),
            username: author.username().to_string(),
            text: text.into(),
            created_at: self.clock.utc(),
        };
        self.posts.append_comment(post_id, &comment).await?;
        Ok(comment)
    }
}
