//! Client-side state layer.
//!
//! Everything a UI needs between its widgets and the backend: the
//! [`DataService`] boundary, one [`EngagementStore`] holding fan state for
//! every view, the persisted [`VoteLedger`], and navigation-scoped
//! cancellation of fetches. [`ClientSession`] composes them.

mod data_service;
mod engagement_store;
mod error;
mod local_store;
pub mod navigation;
mod session;
mod vote_ledger;

#[cfg(test)]
pub use data_service::MockDataService;
pub use data_service::DataService;
pub use engagement_store::{EngagementStore, PendingToggle, PostView, ProfileView};
pub use error::ClientError;
#[cfg(test)]
pub use local_store::MockLocalStore;
pub use local_store::{LocalStore, LocalStoreError};
pub use session::{
    ClientSession, PROFILE_FAILED_MESSAGE, PROFILE_SAVED_MESSAGE, ProfilePage, SettingsOutcome,
};
pub use vote_ledger::{EntryView, VOTES_KEY, VoteDivergence, VoteLedger};
