//! Fan toggling and fan-count reconciliation.
//!
//! A toggle touches three records: the viewer's fanned-artist set, the
//! artist's aggregate count, and the fan-count copy carried by each of the
//! artist's posts. The service serialises toggles so the decision and the
//! post reconciliation never interleave with another toggle. The user
//! repository writes viewer and artist fields together, leaving profile
//! fields to concurrent settings saves.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::ports::{FanCommand, FanToggleOutcome, PostRepository, UserRepository};
use crate::domain::{Error, User, UserId};

/// Service implementing [`FanCommand`].
pub struct FanService<U, P> {
    users: Arc<U>,
    posts: Arc<P>,
    toggle_lock: Mutex<()>,
}

impl<U, P> FanService<U, P> {
    /// Create a new service.
    pub fn new(users: Arc<U>, posts: Arc<P>) -> Self {
        Self {
            users,
            posts,
            toggle_lock: Mutex::new(()),
        }
    }
}

impl<U, P> FanService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn require_user(&self, user_id: &UserId, role: &str) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("{role} not found: {user_id}")))
    }
}

#[async_trait]
impl<U, P> FanCommand for FanService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn toggle_fan(
        &self,
        viewer_id: &UserId,
        artist_id: &UserId,
    ) -> Result<FanToggleOutcome, Error> {
        if viewer_id == artist_id {
            return Err(Error::invalid_request("users cannot fan themselves"));
        }

        let _guard = self.toggle_lock.lock().await;
        let viewer = self.require_user(viewer_id, "viewer").await?;
        let artist = self.require_user(artist_id, "artist").await?;
        if !artist.is_artist() {
            return Err(Error::invalid_request(format!(
                "user {artist_id} is not an artist"
            )));
        }

        let is_fanned = !viewer.is_fan_of(artist_id);
        let new_fan_count = self.users.set_fan(viewer_id, artist_id, is_fanned).await?;
        let synced = self
            .posts
            .sync_artist_fan_count(artist_id, new_fan_count)
            .await?;
        debug!(artist_id = %artist_id, posts = synced, "reconciled post fan counts");
        info!(
            viewer_id = %viewer_id,
            artist_id = %artist_id,
            is_fanned,
            fan_count = new_fan_count,
            "fan toggled"
        );

        Ok(FanToggleOutcome {
            is_fanned,
            new_fan_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPostRepository, MockUserRepository, UserRepositoryError};
    use crate::domain::{ErrorCode, UserRole, Username};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn id(raw: &str) -> UserId {
        UserId::new(raw).expect("id")
    }

    fn user(raw_id: &str, name: &str, role: UserRole, fans: u64) -> User {
        User::new(
            id(raw_id),
            Username::new(name).expect("username"),
            role,
            format!("https://picsum.photos/100/100?random={raw_id}"),
            NaiveDate::from_ymd_opt(2023, 6, 20).expect("date"),
        )
        .with_counts(fans, 45)
    }

    fn users_returning(viewer: User, artist: User) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |requested| {
            if requested == viewer.id() {
                Ok(Some(viewer.clone()))
            } else if requested == artist.id() {
                Ok(Some(artist.clone()))
            } else {
                Ok(None)
            }
        });
        users
    }

    #[rstest]
    #[case(false, true, 1241)]
    #[case(true, false, 1239)]
    #[tokio::test]
    async fn toggle_flips_state_and_reconciles_posts(
        #[case] already_fan: bool,
        #[case] expected_fanned: bool,
        #[case] expected_count: u64,
    ) {
        let viewer = user("3", "FanBoy01", UserRole::Fan, 0);
        let viewer = if already_fan {
            viewer.with_fanned_artists([id("1")])
        } else {
            viewer
        };
        let mut users = users_returning(viewer, user("1", "NeonVibes", UserRole::Artist, 1240));
        users
            .expect_set_fan()
            .withf(move |viewer, artist, fanned| {
                viewer.as_ref() == "3" && artist.as_ref() == "1" && *fanned == expected_fanned
            })
            .times(1)
            .return_once(move |_, _, _| Ok(expected_count));
        let mut posts = MockPostRepository::new();
        posts
            .expect_sync_artist_fan_count()
            .withf(move |artist, count| artist.as_ref() == "1" && *count == expected_count)
            .times(1)
            .return_once(|_, _| Ok(2));

        let outcome = FanService::new(Arc::new(users), Arc::new(posts))
            .toggle_fan(&id("3"), &id("1"))
            .await
            .expect("toggle");
        assert_eq!(
            outcome,
            FanToggleOutcome {
                is_fanned: expected_fanned,
                new_fan_count: expected_count,
            }
        );
    }

    #[tokio::test]
    async fn unfanning_never_drives_count_below_zero() {
        let viewer = user("3", "FanBoy01", UserRole::Fan, 0).with_fanned_artists([id("9")]);
        let mut users = users_returning(viewer, user("9", "Fresh", UserRole::Artist, 0));
        users
            .expect_set_fan()
            .withf(|_, _, fanned| !*fanned)
            .times(1)
            .return_once(|_, _, _| Ok(0));
        let mut posts = MockPostRepository::new();
        posts
            .expect_sync_artist_fan_count()
            .return_once(|_, _| Ok(0));

        let outcome = FanService::new(Arc::new(users), Arc::new(posts))
            .toggle_fan(&id("3"), &id("9"))
            .await
            .expect("toggle");
        assert!(!outcome.is_fanned);
        assert_eq!(outcome.new_fan_count, 0);
    }

    #[tokio::test]
    async fn fanning_yourself_is_rejected() {
        let err = FanService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPostRepository::new()),
        )
        .toggle_fan(&id("1"), &id("1"))
        .await
        .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn fanning_a_fan_account_is_rejected() {
        let users = users_returning(
            user("1", "NeonVibes", UserRole::Artist, 1240),
            user("3", "FanBoy01", UserRole::Fan, 0),
        );
        let mut posts = MockPostRepository::new();
        posts.expect_sync_artist_fan_count().never();

        let err = FanService::new(Arc::new(users), Arc::new(posts))
            .toggle_fan(&id("1"), &id("3"))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn unknown_artist_is_not_found() {
        let users = users_returning(
            user("3", "FanBoy01", UserRole::Fan, 0),
            user("1", "NeonVibes", UserRole::Artist, 1240),
        );
        let err = FanService::new(Arc::new(users), Arc::new(MockPostRepository::new()))
            .toggle_fan(&id("3"), &id("77"))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn storage_failures_surface_as_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Err(UserRepositoryError::connection("offline")));
        let err = FanService::new(Arc::new(users), Arc::new(MockPostRepository::new()))
            .toggle_fan(&id("3"), &id("1"))
            .await
            .expect_err("offline");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
