//! Port for the server-side record of who voted for what.
//!
//! This is the authoritative ledger clients reconcile their local voted set
//! against.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{EntryId, Error, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
    }
}

impl From<VoteRepositoryError> for Error {
    fn from(err: VoteRepositoryError) -> Self {
        match err {
            VoteRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("vote repository unavailable: {message}"))
            }
            VoteRepositoryError::Query { message } => {
                Error::internal(format!("vote repository error: {message}"))
            }
        }
    }
}

/// Insert-if-absent ledger of (voter, entry) pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Record a vote. Returns `false` when the pair was already present.
    async fn record(&self, voter: &UserId, entry: &EntryId) -> Result<bool, VoteRepositoryError>;

    /// Entries the voter has voted for.
    async fn voted_entries(
        &self,
        voter: &UserId,
    ) -> Result<BTreeSet<EntryId>, VoteRepositoryError>;
}
