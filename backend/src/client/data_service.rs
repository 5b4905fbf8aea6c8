//! The data-service boundary seen by a UI.
//!
//! [`DataService`] flattens the driving ports into the call surface a view
//! layer needs. [`ServicePorts`] implements it in-process by delegating to
//! the domain services; a remote implementation would speak the HTTP API.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::ports::FanToggleOutcome;
use crate::domain::{
    Comment, CommentText, ContestCategory, ContestEntry, ContestSubmission, EntryId, Error,
    NewPost, Post, PostId, User, UserId, UserProfileUpdate, Username, VoteOutcome,
};
use crate::wiring::ServicePorts;

/// Operations the client layer performs against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataService: Send + Sync {
    async fn login(&self, username: &Username) -> Result<User, Error>;
    async fn get_feed(&self) -> Result<Vec<Post>, Error>;
    async fn get_artist_posts(&self, artist_id: &UserId) -> Result<Vec<Post>, Error>;
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, Error>;
    async fn create_post(&self, author_id: &UserId, draft: NewPost) -> Result<Post, Error>;
    async fn add_comment(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        text: CommentText,
    ) -> Result<Comment, Error>;
    async fn toggle_fan(
        &self,
        viewer_id: &UserId,
        artist_id: &UserId,
    ) -> Result<FanToggleOutcome, Error>;
    async fn get_contest_entries(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<ContestEntry>, Error>;
    async fn vote_for_entry(
        &self,
        voter_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<VoteOutcome, Error>;
    async fn voted_entries(&self, voter_id: &UserId) -> Result<BTreeSet<EntryId>, Error>;
    async fn submit_contest_entry(
        &self,
        user_id: &UserId,
        submission: ContestSubmission,
    ) -> Result<ContestEntry, Error>;
    async fn update_user(
        &self,
        user_id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, Error>;
    async fn generate_caption(&self, title: &str, tags: &[String]) -> Result<String, Error>;
}

#[async_trait]
impl DataService for ServicePorts {
    async fn login(&self, username: &Username) -> Result<User, Error> {
        self.login.login(username).await
    }

    async fn get_feed(&self) -> Result<Vec<Post>, Error> {
        self.feed.feed().await
    }

    async fn get_artist_posts(&self, artist_id: &UserId) -> Result<Vec<Post>, Error> {
        self.feed.artist_posts(artist_id).await
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.profile.find_user(user_id).await
    }

    async fn create_post(&self, author_id: &UserId, draft: NewPost) -> Result<Post, Error> {
        self.posts.create_post(author_id, draft).await
    }

    async fn add_comment(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        self.posts.add_comment(post_id, author_id, text).await
    }

    async fn toggle_fan(
        &self,
        viewer_id: &UserId,
        artist_id: &UserId,
    ) -> Result<FanToggleOutcome, Error> {
        self.fans.toggle_fan(viewer_id, artist_id).await
    }

    async fn get_contest_entries(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<ContestEntry>, Error> {
        self.contest.entries(category).await
    }

    async fn vote_for_entry(
        &self,
        voter_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<VoteOutcome, Error> {
        self.contest_command.vote_for_entry(voter_id, entry_id).await
    }

    async fn voted_entries(&self, voter_id: &UserId) -> Result<BTreeSet<EntryId>, Error> {
        self.contest.voted_entries(voter_id).await
    }

    async fn submit_contest_entry(
        &self,
        user_id: &UserId,
        submission: ContestSubmission,
    ) -> Result<ContestEntry, Error> {
        self.contest_command.submit_entry(user_id, submission).await
    }

    async fn update_user(
        &self,
        user_id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, Error> {
        self.profile_command.update_profile(user_id, update).await
    }

    async fn generate_caption(&self, title: &str, tags: &[String]) -> Result<String, Error> {
        self.captions.generate_caption(title, tags).await
    }
}
