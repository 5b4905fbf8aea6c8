//! Client-layer error type.

use crate::domain::{Error, UserId};

/// Failures surfaced by client-side flows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The fetch was superseded by a navigation and its result discarded.
    #[error("request cancelled by navigation")]
    Cancelled,
    /// The flow needs a logged-in user.
    #[error("no user is logged in")]
    NotLoggedIn,
    /// A toggle for this artist has not settled yet.
    #[error("a fan toggle for artist {artist_id} is already in flight")]
    ToggleInFlight {
        /// Artist whose toggle is pending.
        artist_id: UserId,
    },
    /// The data service rejected the call.
    #[error(transparent)]
    Service(#[from] Error),
}

impl ClientError {
    /// Whether the error came from a navigation cancelling the fetch.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
