//! In-memory storage adapters.
//!
//! [`MemoryStore`] owns every table behind a single `tokio::sync::RwLock`.
//! The repository adapters are thin handles sharing one store, in the same
//! way database-backed repositories would share a connection pool. An
//! optional artificial delay imitates a remote data service.

mod contest;
mod posts;
mod seed;
mod users;
mod votes;

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{ContestEntry, EntryId, Post, User, UserId};

pub use contest::MemoryContestRepository;
pub use posts::MemoryPostRepository;
pub use users::MemoryUserRepository;
pub use votes::MemoryVoteRepository;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: Vec<User>,
    /// Newest first.
    pub(crate) posts: VecDeque<Post>,
    pub(crate) entries: Vec<ContestEntry>,
    pub(crate) votes: BTreeMap<UserId, BTreeSet<EntryId>>,
}

/// Shared in-memory tables backing the memory repositories.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    latency: Option<Duration>,
}

impl MemoryStore {
    /// Empty store with no artificial latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the demo users, posts and contest entries.
    ///
    /// Relative timestamps (the older demo posts) are computed from `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            tables: RwLock::new(seed::demo_tables(now)),
            latency: None,
        }
    }

    /// Delay every repository call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = (!latency.is_zero()).then_some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.simulate_latency().await;
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.simulate_latency().await;
        self.tables.write().await
    }
}
