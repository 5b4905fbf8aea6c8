//! In-memory [`UserRepository`] adapter.

use std::sync::Arc;

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId, UserProfileUpdate, Username};

/// User repository over a shared [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    /// Create a repository handle over `store`.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.store.read().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.username().matches(username))
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self.store.write().await;
        if tables
            .users
            .iter()
            .any(|existing| existing.username().matches(user.username()))
        {
            return Err(UserRepositoryError::duplicate(user.username().as_ref()));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, UserRepositoryError> {
        let mut tables = self.store.write().await;
        if let Some(username) = update.username.as_ref() {
            if tables
                .users
                .iter()
                .any(|other| other.id() != id && other.username().matches(username))
            {
                return Err(UserRepositoryError::duplicate(username.as_ref()));
            }
        }
        let user = tables
            .users
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| UserRepositoryError::missing(id.as_ref()))?;
        user.apply_update(update)
            .map_err(|err| UserRepositoryError::rejected(err.to_string()))?;
        Ok(user.clone())
    }

    async fn set_fan(
        &self,
        viewer_id: &UserId,
        artist_id: &UserId,
        fanned: bool,
    ) -> Result<u64, UserRepositoryError> {
        let mut tables = self.store.write().await;
        if !tables.users.iter().any(|user| user.id() == artist_id) {
            return Err(UserRepositoryError::missing(artist_id.as_ref()));
        }
        let viewer = tables
            .users
            .iter_mut()
            .find(|user| user.id() == viewer_id)
            .ok_or_else(|| UserRepositoryError::missing(viewer_id.as_ref()))?;
        let changed = if fanned {
            viewer.add_fanned_artist(artist_id.clone())
        } else {
            viewer.remove_fanned_artist(artist_id)
        };
        let artist = tables
            .users
            .iter_mut()
            .find(|user| user.id() == artist_id)
            .ok_or_else(|| UserRepositoryError::missing(artist_id.as_ref()))?;
        let fan_count = match (changed, fanned) {
            (true, true) => artist.gain_fan(),
            (true, false) => artist.lose_fan(),
            (false, _) => artist.fan_count(),
        };
        Ok(fan_count)
    }
}
