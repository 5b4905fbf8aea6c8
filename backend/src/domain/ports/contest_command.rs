//! Driving port for contest participation.

use async_trait::async_trait;

use crate::domain::{ContestEntry, ContestSubmission, EntryId, Error, UserId, VoteOutcome};

/// Domain use-case port for voting and entering the contest.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestCommand: Send + Sync {
    /// Vote once for an entry. Repeat votes are accepted as no-ops.
    async fn vote_for_entry(
        &self,
        voter_id: &UserId,
        entry_id: &EntryId,
    ) -> Result<VoteOutcome, Error>;

    /// Enter the contest.
    async fn submit_entry(
        &self,
        user_id: &UserId,
        submission: ContestSubmission,
    ) -> Result<ContestEntry, Error>;
}
