//! In-memory [`VoteRepository`] adapter.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{EntryId, UserId};

/// Vote ledger over a shared [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryVoteRepository {
    store: Arc<MemoryStore>,
}

impl MemoryVoteRepository {
    /// Create a repository handle over `store`.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VoteRepository for MemoryVoteRepository {
    async fn record(&self, voter: &UserId, entry: &EntryId) -> Result<bool, VoteRepositoryError> {
        let mut tables = self.store.write().await;
        Ok(tables
            .votes
            .entry(voter.clone())
            .or_default()
            .insert(entry.clone()))
    }

    async fn voted_entries(
        &self,
        voter: &UserId,
    ) -> Result<BTreeSet<EntryId>, VoteRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables.votes.get(voter).cloned().unwrap_or_default())
    }
}
