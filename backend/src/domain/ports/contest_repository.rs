//! Port for contest entry storage.

use async_trait::async_trait;

use crate::domain::{ContestCategory, ContestEntry, EntryId, Error};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contest repository adapters.
    pub enum ContestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contest repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contest repository query failed: {message}",
        /// Mutation targeted an entry that does not exist.
        Missing { id: String } => "contest entry not found: {id}",
    }
}

impl From<ContestRepositoryError> for Error {
    fn from(err: ContestRepositoryError) -> Self {
        match err {
            ContestRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("contest repository unavailable: {message}"))
            }
            ContestRepositoryError::Query { message } => {
                Error::internal(format!("contest repository error: {message}"))
            }
            ContestRepositoryError::Missing { id } => {
                Error::not_found(format!("contest entry not found: {id}"))
            }
        }
    }
}

/// Storage for contest entries and their tallies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestRepository: Send + Sync {
    /// Entries, optionally restricted to one category, in submission order.
    async fn list(
        &self,
        category: Option<ContestCategory>,
    ) -> Result<Vec<ContestEntry>, ContestRepositoryError>;

    /// Fetch a single entry.
    async fn find_by_id(
        &self,
        id: &EntryId,
    ) -> Result<Option<ContestEntry>, ContestRepositoryError>;

    /// Store a new entry.
    async fn insert(&self, entry: &ContestEntry) -> Result<(), ContestRepositoryError>;

    /// Add one vote to the entry and return the new tally.
    async fn increment_votes(&self, id: &EntryId) -> Result<u64, ContestRepositoryError>;
}
