//! The client session: what a UI drives.
//!
//! `ClientSession` ties the data service to the local state containers.
//! Reads go through the navigator so stale responses are discarded; writes
//! update local state optimistically where the flow calls for it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use super::navigation::{Navigator, View, guarded};
use super::{
    ClientError, DataService, EngagementStore, EntryView, LocalStore, PostView, ProfileView,
    VoteDivergence, VoteLedger,
};
use crate::domain::ports::FanToggleOutcome;
use crate::domain::{
    Comment, CommentText, ContestCategory, ContestEntry, ContestSubmission, EntryId, Error,
    NewPost, Post, PostId, User, UserId, UserProfileUpdate, Username,
};

/// Message shown after a successful settings save.
pub const PROFILE_SAVED_MESSAGE: &str = "Profile updated successfully!";
/// Message shown after a failed settings save.
pub const PROFILE_FAILED_MESSAGE: &str = "Failed to update profile. Please try again.";

/// Result of the settings flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsOutcome {
    /// The profile was saved.
    Saved(User),
    /// The save failed; the error has been logged.
    Failed(ClientError),
}

impl SettingsOutcome {
    /// The message the settings screen displays.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Saved(_) => PROFILE_SAVED_MESSAGE,
            Self::Failed(_) => PROFILE_FAILED_MESSAGE,
        }
    }
}

/// A profile page: the profile and the artist's posts.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    /// The user, with the count read from the shared artist entry.
    pub profile: ProfileView,
    /// The user's posts, newest first.
    pub posts: Vec<PostView>,
}

/// Client state for one signed-in (or anonymous) user.
pub struct ClientSession {
    service: Arc<dyn DataService>,
    engagement: EngagementStore,
    votes: VoteLedger,
    navigator: Navigator,
    user: Mutex<Option<User>>,
}

impl ClientSession {
    /// Create a session over `service`, loading persisted votes from
    /// `local`.
    pub fn new(service: Arc<dyn DataService>, local: Arc<dyn LocalStore>) -> Self {
        Self {
            service,
            engagement: EngagementStore::new(),
            votes: VoteLedger::load(local),
            navigator: Navigator::new(),
            user: Mutex::new(None),
        }
    }

    fn user_slot(&self) -> MutexGuard<'_, Option<User>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_user(&self) -> Result<UserId, ClientError> {
        self.user_slot()
            .as_ref()
            .map(|user| user.id().clone())
            .ok_or(ClientError::NotLoggedIn)
    }

    /// The shared engagement container.
    pub fn engagement(&self) -> &EngagementStore {
        &self.engagement
    }

    /// The contest vote ledger.
    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    /// The navigator owning fetch cancellation.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The logged-in user.
    pub fn current_user(&self) -> Option<User> {
        self.user_slot().clone()
    }

    /// Log in by username and reconcile the vote ledger.
    pub async fn login(&self, username: &str) -> Result<User, ClientError> {
        let username = Username::new(username).map_err(Error::from)?;
        let user = self.service.login(&username).await?;
        self.engagement.set_viewer(&user);
        *self.user_slot() = Some(user.clone());
        info!(user_id = %user.id(), "logged in");
        if let Err(err) = self.sync_votes().await {
            warn!(error = %err, "vote sync after login failed");
        }
        Ok(user)
    }

    /// Forget the current user and this client's stored votes.
    pub fn logout(&self) {
        *self.user_slot() = None;
        self.engagement.clear_viewer();
        self.votes.clear();
        self.navigator.navigate(View::Feed);
    }

    /// Navigate to the feed and load it.
    pub async fn open_feed(&self) -> Result<Vec<PostView>, ClientError> {
        let token = self.navigator.navigate(View::Feed);
        let posts = guarded(&token, self.service.get_feed()).await?;
        self.engagement.replace_feed(posts);
        Ok(self.engagement.feed())
    }

    /// Navigate to an artist's profile and load it with their posts.
    pub async fn open_profile(&self, user_id: &UserId) -> Result<ProfilePage, ClientError> {
        let token = self
            .navigator
            .navigate(View::Profile(user_id.clone()));
        let (user, posts) = guarded(&token, async {
            tokio::try_join!(
                self.service.get_user(user_id),
                self.service.get_artist_posts(user_id)
            )
        })
        .await?;
        let user = user.ok_or_else(|| Error::not_found(format!("user not found: {user_id}")))?;
        self.engagement.ingest_profile(user);
        self.engagement.ingest_posts(posts);
        let profile = self
            .engagement
            .profile(user_id)
            .ok_or_else(|| Error::internal("profile missing after ingest"))?;
        Ok(ProfilePage {
            profile,
            posts: self.engagement.artist_posts(user_id),
        })
    }

    /// Become or stop being a fan of `artist_id`.
    ///
    /// The change is visible immediately and rolled back if the backend
    /// rejects it.
    pub async fn toggle_fan(&self, artist_id: &UserId) -> Result<FanToggleOutcome, ClientError> {
        let viewer_id = self.require_user()?;
        let pending = self.engagement.begin_toggle(artist_id)?;
        let result = self.service.toggle_fan(&viewer_id, artist_id).await;
        self.engagement.settle_toggle(pending, result)
    }

    /// Publish a post and put it at the top of the feed.
    pub async fn create_post(&self, draft: NewPost) -> Result<Post, ClientError> {
        let author_id = self.require_user()?;
        let post = self.service.create_post(&author_id, draft).await?;
        self.engagement.prepend_post(post.clone());
        Ok(post)
    }

    /// Comment on a post as the current user.
    pub async fn add_comment(&self, post_id: &PostId, text: &str) -> Result<Comment, ClientError> {
        let author_id = self.require_user()?;
        let text = CommentText::new(text).map_err(Error::from)?;
        let comment = self.service.add_comment(post_id, &author_id, text).await?;
        self.engagement.append_comment(post_id, comment.clone());
        Ok(comment)
    }

    /// Suggest a caption for the upload form.
    pub async fn generate_caption(
        &self,
        title: &str,
        tags: &[String],
    ) -> Result<String, ClientError> {
        Ok(self.service.generate_caption(title, tags).await?)
    }

    /// Navigate to the contest and load its entries.
    pub async fn open_contest(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<EntryView>, ClientError> {
        let token = self.navigator.navigate(View::Contest);
        let entries = guarded(&token, self.service.get_contest_entries(category)).await?;
        self.votes.replace_entries(entries);
        Ok(self.votes.entries())
    }

    /// Vote for an entry.
    ///
    /// Returns `Ok(false)` when this client already voted for it; no call is
    /// made in that case.
    pub async fn vote(&self, entry_id: &EntryId) -> Result<bool, ClientError> {
        let voter_id = self.require_user()?;
        if !self.votes.vote(entry_id) {
            return Ok(false);
        }
        let result = self.service.vote_for_entry(&voter_id, entry_id).await;
        self.votes.confirm(entry_id, &result);
        result?;
        Ok(true)
    }

    /// Replace the local vote set with the backend's.
    pub async fn sync_votes(&self) -> Result<VoteDivergence, ClientError> {
        let voter_id = self.require_user()?;
        let voted = self.service.voted_entries(&voter_id).await?;
        Ok(self.votes.sync(voted))
    }

    /// Submit a contest entry as the current user.
    pub async fn submit_entry(
        &self,
        submission: ContestSubmission,
    ) -> Result<ContestEntry, ClientError> {
        let user_id = self.require_user()?;
        let entry = self
            .service
            .submit_contest_entry(&user_id, submission)
            .await?;
        self.votes.prepend_entry(entry.clone());
        Ok(entry)
    }

    /// Save settings for the current user.
    pub async fn update_profile(&self, update: UserProfileUpdate) -> SettingsOutcome {
        let result = async {
            let user_id = self.require_user()?;
            Ok::<_, ClientError>(self.service.update_user(&user_id, update).await?)
        }
        .await;
        match result {
            Ok(user) => {
                *self.user_slot() = Some(user.clone());
                self.engagement.ingest_profile(user.clone());
                SettingsOutcome::Saved(user)
            }
            Err(err) => {
                warn!(error = %err, "profile update failed");
                SettingsOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
