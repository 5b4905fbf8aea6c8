//! Single reactive container for fan state on the client.
//!
//! Each artist has exactly one fan-count entry. Posts and profiles are
//! cached as loaded but their fan counts are never read back: views overlay
//! the artist entry, so a toggle updates every screen at once.
//!
//! Toggles are optimistic. [`EngagementStore::begin_toggle`] applies the
//! expected outcome before the backend call and
//! [`EngagementStore::settle_toggle`] either confirms it with the server's
//! numbers or restores the previous state.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::ClientError;
use crate::domain::ports::FanToggleOutcome;
use crate::domain::{Comment, Error, Post, PostId, User, UserId};

/// A post as a view renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    /// Post with `fan_count` taken from the artist entry.
    pub post: Post,
    /// Whether the current viewer is a fan of the post's artist.
    pub viewer_is_fan: bool,
}

/// A profile as a view renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    /// Profile whose `fan_count` is the artist entry's.
    pub user: User,
    /// Whether the current viewer is a fan of this user.
    pub viewer_is_fan: bool,
}

/// Proof that a toggle was started; hand it back to `settle_toggle`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a started toggle must be settled"]
pub struct PendingToggle {
    artist_id: UserId,
    was_fanned: bool,
    previous_count: Option<u64>,
}

impl PendingToggle {
    /// Artist being toggled.
    pub fn artist_id(&self) -> &UserId {
        &self.artist_id
    }

    /// The fan state the viewer expects after the call.
    pub fn expects_fanned(&self) -> bool {
        !self.was_fanned
    }
}

#[derive(Debug, Default)]
struct Engagement {
    viewer: Option<UserId>,
    fanned: BTreeSet<UserId>,
    fan_counts: HashMap<UserId, u64>,
    posts: HashMap<PostId, Post>,
    feed: Vec<PostId>,
    profiles: HashMap<UserId, User>,
    in_flight: BTreeSet<UserId>,
}

impl Engagement {
    fn post_view(&self, post: &Post) -> PostView {
        let mut post = post.clone();
        if let Some(count) = self.fan_counts.get(&post.artist_id) {
            post.fan_count = *count;
        }
        PostView {
            viewer_is_fan: self.fanned.contains(&post.artist_id),
            post,
        }
    }

    fn seed_count(&mut self, artist_id: &UserId, count: u64) {
        self.fan_counts.entry(artist_id.clone()).or_insert(count);
    }

    fn store_post(&mut self, post: Post) -> PostId {
        self.seed_count(&post.artist_id, post.fan_count);
        let id = post.id.clone();
        self.posts.insert(id.clone(), post);
        id
    }
}

/// Normalised client cache with a revision counter for observers.
#[derive(Debug)]
pub struct EngagementStore {
    state: Mutex<Engagement>,
    revision: watch::Sender<u64>,
}

impl Default for EngagementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngagementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(Engagement::default()),
            revision,
        }
    }

    /// Observe mutations. The value increases on every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current revision.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn lock(&self) -> MutexGuard<'_, Engagement> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn changed(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Adopt `user` as the viewer, taking their fanned set as authoritative.
    pub fn set_viewer(&self, user: &User) {
        {
            let mut state = self.lock();
            state.viewer = Some(user.id().clone());
            state.fanned = user.fanned_artist_ids().clone();
            state.in_flight.clear();
            state
                .fan_counts
                .insert(user.id().clone(), user.fan_count());
            state.profiles.insert(user.id().clone(), user.clone());
        }
        self.changed();
    }

    /// Forget the viewer and their fanned set.
    pub fn clear_viewer(&self) {
        {
            let mut state = self.lock();
            state.viewer = None;
            state.fanned.clear();
            state.in_flight.clear();
        }
        self.changed();
    }

    /// The logged-in viewer, if any.
    pub fn viewer(&self) -> Option<UserId> {
        self.lock().viewer.clone()
    }

    /// Replace the feed with `posts`, in the order given.
    ///
    /// Artist counts are only seeded for artists the store has not seen;
    /// a post's snapshot never overrides a known count.
    pub fn replace_feed(&self, posts: Vec<Post>) {
        {
            let mut state = self.lock();
            let feed: Vec<PostId> = posts
                .into_iter()
                .map(|post| state.store_post(post))
                .collect();
            state.feed = feed;
        }
        self.changed();
    }

    /// Cache posts without touching the feed order.
    pub fn ingest_posts(&self, posts: Vec<Post>) {
        {
            let mut state = self.lock();
            for post in posts {
                state.store_post(post);
            }
        }
        self.changed();
    }

    /// Cache a freshly created post and show it first in the feed.
    pub fn prepend_post(&self, post: Post) {
        {
            let mut state = self.lock();
            let id = state.store_post(post);
            state.feed.retain(|existing| existing != &id);
            state.feed.insert(0, id);
        }
        self.changed();
    }

    /// Append a comment to a cached post. Unknown posts are ignored.
    pub fn append_comment(&self, post_id: &PostId, comment: Comment) {
        let appended = {
            let mut state = self.lock();
            match state.posts.get_mut(post_id) {
                Some(post) => {
                    post.comments.push(comment);
                    true
                }
                None => false,
            }
        };
        if appended {
            self.changed();
        } else {
            debug!(post_id = %post_id, "comment for uncached post dropped");
        }
    }

    /// Cache a profile. Profile counts are authoritative and overwrite the
    /// artist entry.
    pub fn ingest_profile(&self, user: User) {
        {
            let mut state = self.lock();
            let id = user.id().clone();
            state.fan_counts.insert(id.clone(), user.fan_count());
            let is_viewer = state.viewer.as_ref() == Some(&id);
            if is_viewer && state.in_flight.is_empty() {
                state.fanned = user.fanned_artist_ids().clone();
            }
            state.profiles.insert(id, user);
        }
        self.changed();
    }

    /// The artist's single fan-count entry.
    pub fn fan_count(&self, artist_id: &UserId) -> Option<u64> {
        self.lock().fan_counts.get(artist_id).copied()
    }

    /// Whether the viewer is currently shown as a fan of `artist_id`.
    pub fn is_fanned(&self, artist_id: &UserId) -> bool {
        self.lock().fanned.contains(artist_id)
    }

    /// The feed in display order.
    pub fn feed(&self) -> Vec<PostView> {
        let state = self.lock();
        state
            .feed
            .iter()
            .filter_map(|id| state.posts.get(id))
            .map(|post| state.post_view(post))
            .collect()
    }

    /// A single cached post.
    pub fn post(&self, post_id: &PostId) -> Option<PostView> {
        let state = self.lock();
        state.posts.get(post_id).map(|post| state.post_view(post))
    }

    /// Cached posts by `artist_id`, newest first.
    pub fn artist_posts(&self, artist_id: &UserId) -> Vec<PostView> {
        let state = self.lock();
        let mut posts: Vec<&Post> = state
            .posts
            .values()
            .filter(|post| &post.artist_id == artist_id)
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.into_iter().map(|post| state.post_view(post)).collect()
    }

    /// A cached profile with its live fan count.
    pub fn profile(&self, user_id: &UserId) -> Option<ProfileView> {
        let state = self.lock();
        let user = state.profiles.get(user_id)?;
        let fan_count = state
            .fan_counts
            .get(user_id)
            .copied()
            .unwrap_or(user.fan_count());
        Some(ProfileView {
            user: user.clone().with_counts(fan_count, user.following_count()),
            viewer_is_fan: state.fanned.contains(user_id),
        })
    }

    /// Apply the expected outcome of toggling `artist_id` before the backend
    /// answers.
    pub fn begin_toggle(&self, artist_id: &UserId) -> Result<PendingToggle, ClientError> {
        let pending = {
            let mut state = self.lock();
            if state.viewer.is_none() {
                return Err(ClientError::NotLoggedIn);
            }
            if !state.in_flight.insert(artist_id.clone()) {
                return Err(ClientError::ToggleInFlight {
                    artist_id: artist_id.clone(),
                });
            }
            let was_fanned = state.fanned.contains(artist_id);
            let previous_count = state.fan_counts.get(artist_id).copied();
            if was_fanned {
                state.fanned.remove(artist_id);
            } else {
                state.fanned.insert(artist_id.clone());
            }
            if let Some(count) = previous_count {
                let optimistic = if was_fanned {
                    count.saturating_sub(1)
                } else {
                    count.saturating_add(1)
                };
                state.fan_counts.insert(artist_id.clone(), optimistic);
            }
            PendingToggle {
                artist_id: artist_id.clone(),
                was_fanned,
                previous_count,
            }
        };
        self.changed();
        Ok(pending)
    }

    /// Resolve a toggle with the backend's answer.
    ///
    /// On success the server's state and count replace the optimistic values
    /// and the viewer's cached profile follows. On failure the previous state
    /// is restored and the error returned.
    pub fn settle_toggle(
        &self,
        pending: PendingToggle,
        result: Result<FanToggleOutcome, Error>,
    ) -> Result<FanToggleOutcome, ClientError> {
        let PendingToggle {
            artist_id,
            was_fanned,
            previous_count,
        } = pending;
        let settled = {
            let mut state = self.lock();
            state.in_flight.remove(&artist_id);
            match result {
                Ok(outcome) => {
                    if outcome.is_fanned {
                        state.fanned.insert(artist_id.clone());
                    } else {
                        state.fanned.remove(&artist_id);
                    }
                    state
                        .fan_counts
                        .insert(artist_id.clone(), outcome.new_fan_count);
                    let viewer_id = state.viewer.clone();
                    if let Some(viewer) = viewer_id.and_then(|id| state.profiles.get_mut(&id)) {
                        if outcome.is_fanned {
                            viewer.add_fanned_artist(artist_id.clone());
                        } else {
                            viewer.remove_fanned_artist(&artist_id);
                        }
                    }
                    debug!(
                        artist_id = %artist_id,
                        is_fanned = outcome.is_fanned,
                        fan_count = outcome.new_fan_count,
                        "fan toggle confirmed"
                    );
                    Ok(outcome)
                }
                Err(err) => {
                    if was_fanned {
                        state.fanned.insert(artist_id.clone());
                    } else {
                        state.fanned.remove(&artist_id);
                    }
                    match previous_count {
                        Some(count) => state.fan_counts.insert(artist_id.clone(), count),
                        None => state.fan_counts.remove(&artist_id),
                    };
                    warn!(
                        artist_id = %artist_id,
                        error = %err,
                        "fan toggle failed; restored previous state"
                    );
                    Err(ClientError::Service(err))
                }
            }
        };
        self.changed();
        settled
    }
}

#[cfg(test)]
#[path = "engagement_store_tests.rs"]
mod tests;
