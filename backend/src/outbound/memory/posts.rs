//! In-memory [`PostRepository`] adapter.

use std::sync::Arc;

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Comment, Post, PostId, UserId};

/// Post repository over a shared [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryPostRepository {
    store: Arc<MemoryStore>,
}

impl MemoryPostRepository {
    /// Create a repository handle over `store`.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list_feed(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables.posts.iter().cloned().collect())
    }

    async fn list_by_artist(&self, artist_id: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables
            .posts
            .iter()
            .filter(|post| &post.artist_id == artist_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables.posts.iter().find(|post| &post.id == id).cloned())
    }

    async fn prepend(&self, post: &Post) -> Result<Post, PostRepositoryError> {
        let mut tables = self.store.write().await;
        let mut stored = post.clone();
        if let Some(author) = tables.users.iter().find(|user| user.id() == &post.artist_id) {
            stored.fan_count = author.fan_count();
        }
        tables.posts.push_front(stored.clone());
        Ok(stored)
    }

    async fn append_comment(
        &self,
        post_id: &PostId,
        comment: &Comment,
    ) -> Result<(), PostRepositoryError> {
        let mut tables = self.store.write().await;
        let post = tables
            .posts
            .iter_mut()
            .find(|post| &post.id == post_id)
            .ok_or_else(|| PostRepositoryError::missing(post_id.as_ref()))?;
        post.comments.push(comment.clone());
        Ok(())
    }

    async fn sync_artist_fan_count(
        &self,
        artist_id: &UserId,
        fan_count: u64,
    ) -> Result<usize, PostRepositoryError> {
        let mut tables = self.store.write().await;
        let mut synced = 0;
        for post in tables
            .posts
            .iter_mut()
            .filter(|post| &post.artist_id == artist_id)
        {
            post.fan_count = fan_count;
            synced += 1;
        }
        Ok(synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommentId;
    use crate::test_support::fixture_timestamp;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> MemoryPostRepository {
        MemoryPostRepository::new(Arc::new(MemoryStore::seeded(fixture_timestamp())))
    }

    #[rstest]
    #[tokio::test]
    async fn sync_rewrites_every_post_of_the_artist(repo: MemoryPostRepository) {
        let artist = UserId::new("1").expect("id");
        let synced = repo
            .sync_artist_fan_count(&artist, 1241)
            .await
            .expect("sync");
        assert_eq!(synced, 2);

        let feed = repo.list_feed().await.expect("feed");
        for post in feed {
            let expected = if post.artist_id == artist { 1241 } else { 8900 };
            assert_eq!(post.fan_count, expected, "post {}", post.id);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn prepend_puts_post_at_feed_head(repo: MemoryPostRepository) {
        let mut post = repo
            .find_by_id(&PostId::new("102").expect("id"))
            .await
            .expect("query")
            .expect("post");
        post.id = PostId::new("104").expect("id");
        post.fan_count = 7;
        let stored = repo.prepend(&post).await.expect("prepend");

        let feed = repo.list_feed().await.expect("feed");
        assert_eq!(feed.first(), Some(&stored));
        assert_eq!(feed.len(), 4);
        assert_eq!(stored.fan_count, 8900, "author's live count wins over the draft copy");
    }

    #[rstest]
    #[tokio::test]
    async fn comments_append_in_order(repo: MemoryPostRepository) {
        let post_id = PostId::new("101").expect("id");
        let comment = Comment {
            id: CommentId::new("c2").expect("id"),
            user_id: UserId::new("2").expect("id"),
            username: "BeatMakerPro".to_owned(),
            text: "Needs a soundtrack.".to_owned(),
            created_at: fixture_timestamp(),
        };
        repo.append_comment(&post_id, &comment)
            .await
            .expect("append");

        let post = repo
            .find_by_id(&post_id)
            .await
            .expect("query")
            .expect("post");
        let ids: Vec<&str> = post.comments.iter().map(|c| c.id.as_ref()).collect();
        assert_eq!(ids, ["c1", "c2"]);
    }

    #[rstest]
    #[tokio::test]
    async fn commenting_on_unknown_post_is_missing(repo: MemoryPostRepository) {
        let comment = Comment {
            id: CommentId::random(),
            user_id: UserId::new("3").expect("id"),
            username: "FanBoy01".to_owned(),
            text: "Hello?".to_owned(),
            created_at: fixture_timestamp(),
        };
        let err = repo
            .append_comment(&PostId::new("999").expect("id"), &comment)
            .await
            .expect_err("missing");
        assert_eq!(err, PostRepositoryError::missing("999"));
    }
}
