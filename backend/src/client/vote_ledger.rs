//! Client-side record of contest votes.
//!
//! The ledger remembers which entries this client has voted for, persists
//! that set under [`VOTES_KEY`] as a JSON array, and keeps the displayed
//! tallies. A vote is one-way: once an id is in the set it never leaves
//! through [`VoteLedger::vote`].
//!
//! The backend holds the authoritative set. [`VoteLedger::sync`] adopts it
//! and reports where the two disagreed.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::LocalStore;
use crate::domain::{ContestEntry, EntryId, Error, VoteOutcome};

/// Local storage key holding the voted entry ids.
pub const VOTES_KEY: &str = "faceexpo_votes";

/// An entry as the contest view shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// Entry with the displayed tally.
    pub entry: ContestEntry,
    /// Whether this client has voted for it.
    pub has_voted: bool,
}

/// Difference between the local set and the authoritative one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteDivergence {
    /// Ids the client believed voted but the backend did not record.
    pub local_only: BTreeSet<EntryId>,
    /// Ids the backend recorded but the client had forgotten.
    pub remote_only: BTreeSet<EntryId>,
}

impl VoteDivergence {
    /// Whether both sets agreed.
    pub fn is_empty(&self) -> bool {
        self.local_only.is_empty() && self.remote_only.is_empty()
    }
}

#[derive(Debug, Default)]
struct Ledger {
    voted: BTreeSet<EntryId>,
    entries: Vec<ContestEntry>,
}

/// Persisted vote cache.
pub struct VoteLedger {
    store: Arc<dyn LocalStore>,
    state: Mutex<Ledger>,
}

impl std::fmt::Debug for VoteLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteLedger")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn read_voted(store: &dyn LocalStore) -> BTreeSet<EntryId> {
    let raw = match store.get(VOTES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeSet::new(),
        Err(err) => {
            warn!(error = %err, "could not read stored votes; starting empty");
            return BTreeSet::new();
        }
    };
    match serde_json::from_str::<BTreeSet<EntryId>>(&raw) {
        Ok(voted) => voted,
        Err(err) => {
            warn!(error = %err, "stored votes are malformed; starting empty");
            BTreeSet::new()
        }
    }
}

impl VoteLedger {
    /// Load the persisted set from `store`.
    pub fn load(store: Arc<dyn LocalStore>) -> Self {
        let voted = read_voted(store.as_ref());
        debug!(voted = voted.len(), "vote ledger loaded");
        Self {
            store,
            state: Mutex::new(Ledger {
                voted,
                entries: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, voted: &BTreeSet<EntryId>) {
        let encoded = match serde_json::to_string(voted) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "could not encode votes");
                return;
            }
        };
        if let Err(err) = self.store.set(VOTES_KEY, &encoded) {
            warn!(error = %err, "could not persist votes");
        }
    }

    /// Whether this client has voted for `entry_id`.
    pub fn has_voted(&self, entry_id: &EntryId) -> bool {
        self.lock().voted.contains(entry_id)
    }

    /// The local voted set.
    pub fn voted(&self) -> BTreeSet<EntryId> {
        self.lock().voted.clone()
    }

    /// Replace the displayed entries.
    pub fn replace_entries(&self, entries: Vec<ContestEntry>) {
        self.lock().entries = entries;
    }

    /// Add an entry submitted by this client to the top of the list.
    pub fn prepend_entry(&self, entry: ContestEntry) {
        let mut state = self.lock();
        state.entries.retain(|existing| existing.id != entry.id);
        state.entries.insert(0, entry);
    }

    /// The displayed entries with their vote flags.
    pub fn entries(&self) -> Vec<EntryView> {
        let state = self.lock();
        state
            .entries
            .iter()
            .map(|entry| EntryView {
                has_voted: state.voted.contains(&entry.id),
                entry: entry.clone(),
            })
            .collect()
    }

    /// Record a vote locally before the backend call.
    ///
    /// Returns `false` without changing anything when the entry was already
    /// voted for. Otherwise the id is persisted and the displayed tally rises
    /// by exactly one. A persist failure is logged and the vote proceeds.
    pub fn vote(&self, entry_id: &EntryId) -> bool {
        let voted = {
            let mut state = self.lock();
            if !state.voted.insert(entry_id.clone()) {
                debug!(entry_id = %entry_id, "already voted; ignoring");
                return false;
            }
            if let Some(entry) = state.entries.iter_mut().find(|e| &e.id == entry_id) {
                entry.votes = entry.votes.saturating_add(1);
            }
            state.voted.clone()
        };
        self.persist(&voted);
        true
    }

    /// Apply the backend's answer to a vote recorded with [`Self::vote`].
    ///
    /// A successful answer sets the displayed tally to the server's value. A
    /// failure is logged; the local vote stays and the next [`Self::sync`]
    /// reconciles it.
    pub fn confirm(&self, entry_id: &EntryId, result: &Result<VoteOutcome, Error>) {
        match result {
            Ok(outcome) => {
                let mut state = self.lock();
                if let Some(entry) = state.entries.iter_mut().find(|e| &e.id == entry_id) {
                    entry.votes = outcome.votes;
                }
                if !outcome.accepted {
                    debug!(entry_id = %entry_id, "backend already had this vote");
                }
            }
            Err(err) => {
                warn!(entry_id = %entry_id, error = %err, "vote was not recorded by backend");
            }
        }
    }

    /// Forget every local vote and drop the persisted set.
    ///
    /// Tallies stay as displayed; only the per-client flags go.
    pub fn clear(&self) {
        let forgotten = std::mem::take(&mut self.lock().voted).len();
        if let Err(err) = self.store.remove(VOTES_KEY) {
            warn!(error = %err, "could not remove stored votes");
        }
        debug!(forgotten, "vote ledger cleared");
    }

    /// Adopt the backend's voted set and report how the local one differed.
    pub fn sync(&self, authoritative: BTreeSet<EntryId>) -> VoteDivergence {
        let (divergence, voted) = {
            let mut state = self.lock();
            let divergence = VoteDivergence {
                local_only: state.voted.difference(&authoritative).cloned().collect(),
                remote_only: authoritative.difference(&state.voted).cloned().collect(),
            };
            state.voted = authoritative;
            (divergence, state.voted.clone())
        };
        if !divergence.is_empty() {
            info!(
                local_only = divergence.local_only.len(),
                remote_only = divergence.remote_only.len(),
                "vote ledger diverged from backend"
            );
        }
        self.persist(&voted);
        divergence
    }
}
