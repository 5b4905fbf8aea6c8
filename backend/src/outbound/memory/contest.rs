//! In-memory [`ContestRepository`] adapter.

use std::sync::Arc;

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{ContestRepository, ContestRepositoryError};
use crate::domain::{ContestCategory, ContestEntry, EntryId};

/// Contest repository over a shared [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryContestRepository {
    store: Arc<MemoryStore>,
}

impl MemoryContestRepository {
    /// Create a repository handle over `store`.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContestRepository for MemoryContestRepository {
    async fn list(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<ContestEntry>, ContestRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables
            .entries
            .iter()
            .filter(|entry| category.is_none_or(|wanted| entry.category == wanted))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &EntryId,
    ) -> Result<Option<ContestEntry>, ContestRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables.entries.iter().find(|entry| &entry.id == id).cloned())
    }

    async fn insert(&self, entry: &ContestEntry) -> Result<(), ContestRepositoryError> {
        let mut tables = self.store.write().await;
        tables.entries.push(entry.clone());
        Ok(())
    }

    async fn increment_votes(&self, id: &EntryId) -> Result<u64, ContestRepositoryError> {
        let mut tables = self.store.write().await;
        let entry = tables
            .entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| ContestRepositoryError::missing(id.as_ref()))?;
        entry.votes = entry.votes.saturating_add(1);
        Ok(entry.votes)
    }
}
