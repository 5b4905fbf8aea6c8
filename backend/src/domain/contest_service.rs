//! Contest service: browsing entries, voting and submitting.
//!
//! Votes are one-way per (voter, entry). The vote repository is the
//! authoritative ledger; the entry tally is only incremented when the ledger
//! accepts a new pair.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ContestCommand, ContestQuery, ContestRepository, UserRepository, VoteRepository,
};
use crate::domain::{
    ClipWindow, ContestCategory, ContestEntry, ContestSubmission, EntryId, Error, UserId,
    VoteOutcome,
};

/// Service implementing [`ContestQuery`] and [`ContestCommand`].
#[derive(Clone)]
pub struct ContestService<C, V, U> {
    entries: Arc<C>,
    votes: Arc<V>,
    users: Arc<U>,
}

impl<C, V, U> ContestService<C, V, U> {
    /// Create a new service.
    pub fn new(entries: Arc<C>, votes: Arc<V>, users: Arc<U>) -> Self {
        Self {
            entries,
            votes,
            users,
        }
    }
}

fn placeholder_video_url(id: &EntryId) -> String {
    format!("/media/contest/{id}.mp4")
}

#[async_trait]
impl<C, V, U> ContestQuery for ContestService<C, V, U>
where
    C: ContestRepository,
    V: VoteRepository,
    U: UserRepository,
{
    async fn entries(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<ContestEntry>, Error> {
        Ok(self.entries.list(category).await?)
    }

    async fn voted_entries(&self, voter_id: &UserId) -> Result<BTreeSet<EntryId>, Error> {
        Ok(self.votes.voted_entries(voter_id).await?)
    }
}

#[async_trait]
impl<C, V, U> ContestCommand for ContestService<C, V, U>
where
    C: ContestRepository,
    V: VoteRepository,
    U: UserRepository,
{
    async fn vote_for_entry(
        &self,
        voter_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<VoteOutcome, Error> {
        let entry = self
            .entries
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("contest entry not found: {entry_id}")))?;

        if !self.votes.record(voter_id, entry_id).await? {
            debug!(voter_id = %voter_id, entry_id = %entry_id, "repeat vote ignored");
            return Ok(VoteOutcome {
                accepted: false,
                votes: entry.votes,
            });
        }

        let votes = self.entries.increment_votes(entry_id).await?;
        info!(voter_id = %voter_id, entry_id = %entry_id, votes, "vote recorded");
        Ok(VoteOutcome {
            accepted: true,
            votes,
        })
    }

    async fn submit_entry(
        &self,
        user_id: &UserId,
        submission: ContestSubmission,
    ) -> Result<ContestEntry, Error> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user not found: {user_id}")))?;

        if let Some(clip) = submission.clip.as_ref() {
            ClipWindow::try_from_selection(clip)?;
        }

        let id = EntryId::random();
        let video_url = match submission.video_url.as_deref().map(str::trim) {
            Some("") => {
                return Err(Error::invalid_request("video is required").with_details(json!({
                    "field": "videoUrl",
                    "code": "missing_video",
                })));
            }
            Some(url) => url.to_owned(),
            None => placeholder_video_url(&id),
        };

        let entry = ContestEntry {
            title: submission.resolved_title(user.username().as_ref()),
            id,
            user_id: user_id.clone(),
            username: user.username().to_string(),
            user_avatar: user.avatar_url().to_owned(),
            video_url,
            thumbnail_url: None,
            category: submission.category,
            votes: 0,
        };
        self.entries.insert(&entry).await?;
        info!(
            user_id = %user_id,
            entry_id = %entry.id,
            category = %entry.category,
            "contest entry submitted"
        );
        Ok(entry)
    }
}
