//! Account services: demo login and profile management.
//!
//! Login is username-only. A username that matches an existing account
//! (case-insensitively) logs into it; any other username creates a fresh
//! artist account.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use rand::Rng;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, UserProfileCommand, UserProfileQuery, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, User, UserId, UserProfileUpdate, UserRole, Username};

/// Bio given to accounts created on first login.
pub const NEW_USER_BIO: &str = "New to FaceExpo!";

fn random_avatar_url() -> String {
    let seed: u32 = rand::thread_rng().gen_range(0..100);
    format!("https://picsum.photos/100/100?random={seed}")
}

/// Service implementing login and profile ports over a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountService<U> {
    /// Create a new service.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    async fn require_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user not found: {user_id}")))
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn login(&self, username: &Username) -> Result<User, Error> {
        if let Some(user) = self.users.find_by_username(username).await? {
            debug!(user_id = %user.id(), "login matched existing account");
            return Ok(user);
        }

        let user = User::new(
            UserId::random(),
            username.clone(),
            UserRole::Artist,
            random_avatar_url(),
            self.clock.utc().date_naive(),
        )
        .with_bio(NEW_USER_BIO);

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), username = %username, "created account on first login");
                Ok(user)
            }
            // A concurrent login created the account first.
            Err(UserRepositoryError::Duplicate { .. }) => self
                .users
                .find_by_username(username)
                .await?
                .ok_or_else(|| Error::internal("account vanished after duplicate insert")),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<U> UserProfileQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        Ok(self.users.find_by_id(user_id).await?)
    }
}

#[async_trait]
impl<U> UserProfileCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: UserProfileUpdate,
    ) -> Result<User, Error> {
        if update.is_empty() {
            return self.require_user(user_id).await;
        }
        update.validate()?;

        // Field-scoped write: counts changed by concurrent fan toggles survive.
        let user = self.users.update_profile(user_id, update).await?;
        info!(user_id = %user_id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use crate::test_support::FixtureClock;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn seeded() -> User {
        User::new(
            UserId::new("1").expect("id"),
            Username::new("NeonVibes").expect("username"),
            UserRole::Artist,
            "https://picsum.photos/100/100?random=1",
            NaiveDate::from_ymd_opt(2023, 1, 15).expect("date"),
        )
        .with_counts(1240, 5)
    }

    fn make_service(repo: MockUserRepository) -> AccountService<MockUserRepository> {
        AccountService::new(Arc::new(repo), Arc::new(FixtureClock::default()))
    }

    #[fixture]
    fn neon() -> Username {
        Username::new("neonvibes").expect("username")
    }

    #[rstest]
    #[tokio::test]
    async fn login_returns_existing_account(neon: Username) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(seeded())));
        repo.expect_insert().never();

        let user = make_service(repo).login(&neon).await.expect("login");
        assert_eq!(user.id().as_ref(), "1");
    }

    #[tokio::test]
    async fn login_creates_artist_for_unknown_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let username = Username::new("NewPerson").expect("username");
        let user = make_service(repo).login(&username).await.expect("login");

        assert_eq!(user.role(), UserRole::Artist);
        assert_eq!(user.fan_count(), 0);
        assert_eq!(user.following_count(), 0);
        assert_eq!(user.bio(), Some(NEW_USER_BIO));
        assert_eq!(user.joined_date(), FixtureClock::default().utc().date_naive());
        assert!(user.avatar_url().starts_with("https://picsum.photos/100/100?random="));
    }

    #[rstest]
    #[tokio::test]
    async fn login_recovers_from_concurrent_creation(neon: Username) {
        let mut repo = MockUserRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_find_by_username()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Err(UserRepositoryError::duplicate("neonvibes")));
        repo.expect_find_by_username()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Ok(Some(seeded())));

        let user = make_service(repo).login(&neon).await.expect("login");
        assert_eq!(user.id().as_ref(), "1");
    }

    #[rstest]
    #[tokio::test]
    async fn login_surfaces_connection_failures(neon: Username) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .return_once(|_| Err(UserRepositoryError::connection("store offline")));

        let err = make_service(repo).login(&neon).await.expect_err("failure");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn update_profile_rejects_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile()
            .times(1)
            .return_once(|_, _| Err(UserRepositoryError::duplicate("BeatMakerPro")));

        let update = UserProfileUpdate {
            username: Some(Username::new("BeatMakerPro").expect("username")),
            ..UserProfileUpdate::default()
        };
        let err = make_service(repo)
            .update_profile(&UserId::new("1").expect("id"), update)
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn update_profile_persists_changes() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_update_profile()
            .withf(|id, update| {
                id.as_ref() == "1" && update.bio.as_deref() == Some("Now with more neon.")
            })
            .times(1)
            .return_once(|_, update| {
                let mut user = seeded();
                user.apply_update(update).expect("valid update");
                Ok(user)
            });

        let update = UserProfileUpdate {
            bio: Some("Now with more neon.".to_owned()),
            ..UserProfileUpdate::default()
        };
        let user = make_service(repo)
            .update_profile(&UserId::new("1").expect("id"), update)
            .await
            .expect("updated");
        assert_eq!(user.bio(), Some("Now with more neon."));
    }

    #[rstest]
    #[case(UserProfileUpdate::default())]
    #[case(UserProfileUpdate { bio: Some("Hello".to_owned()), ..UserProfileUpdate::default() })]
    #[tokio::test]
    async fn update_profile_reports_missing_user(#[case] update: UserProfileUpdate) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update_profile()
            .returning(|id, _| Err(UserRepositoryError::missing(id.as_ref())));

        let err = make_service(repo)
            .update_profile(&UserId::new("404").expect("id"), update)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn blank_avatar_is_rejected_before_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().never();
        let update = UserProfileUpdate {
            avatar_url: Some("  ".to_owned()),
            ..UserProfileUpdate::default()
        };

        let err = make_service(repo)
            .update_profile(&UserId::new("1").expect("id"), update)
            .await
            .expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
