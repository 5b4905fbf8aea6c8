//! Driving port for contest reads.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{ContestCategory, ContestEntry, EntryId, Error, UserId};

/// Domain use-case port for browsing entries and the voter's ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestQuery: Send + Sync {
    /// Entries, optionally filtered by category.
    async fn entries(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<ContestEntry>, Error>;

    /// Entries the voter has already voted for.
    async fn voted_entries(&self, voter_id: &UserId) -> Result<BTreeSet<EntryId>, Error>;
}
